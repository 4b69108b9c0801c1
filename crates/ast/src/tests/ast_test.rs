use crate::types::{BuiltInType, FuncParameter, FuncType, ParameterDirection, Type};
use crate::Program;

#[test]
fn test_structural_equality() {
    let built_in1 = BuiltInType {
        name: "i32".to_string(),
    };
    let built_in2 = BuiltInType {
        name: "i32".to_string(),
    };
    let built_in3 = BuiltInType {
        name: "i64".to_string(),
    };
    assert_eq!(built_in1, built_in2);
    assert_ne!(built_in1, built_in3);

    let mut program = Program::new();
    let i32_id = program.find_or_add_type(Type::i32());

    let param1 = FuncParameter {
        name: "exitCode".to_string(),
        direction: ParameterDirection::Out,
        type_id: i32_id,
    };
    let param2 = param1.clone();
    let param3 = FuncParameter {
        name: "other".to_string(),
        direction: ParameterDirection::Out,
        type_id: i32_id,
    };
    assert_eq!(param1, param2);
    assert_ne!(param1, param3);

    let func1 = Type::Func(FuncType {
        parameters: vec![param1],
    });
    let func2 = Type::Func(FuncType {
        parameters: vec![param2],
    });
    let func3 = Type::Func(FuncType {
        parameters: vec![param3],
    });
    assert_eq!(func1, func2);
    assert_ne!(func1, func3);
    assert_ne!(func1, Type::i32());
}

#[test]
fn test_interning_deduplicates() {
    let mut program = Program::new();

    let first = program.find_or_add_type(Type::i32());
    let second = program.find_or_add_type(Type::i32());
    assert_eq!(first, second);
    assert_eq!(program.types.len(), 1);

    let func = |program: &mut Program| {
        let i32_id = program.find_or_add_type(Type::i32());
        Type::Func(FuncType {
            parameters: vec![FuncParameter {
                name: "exitCode".to_string(),
                direction: ParameterDirection::Out,
                type_id: i32_id,
            }],
        })
    };
    let ty = func(&mut program);
    let func_first = program.find_or_add_type(ty.clone());
    let func_second = program.find_or_add_type(ty);
    assert_eq!(func_first, func_second);
    assert_ne!(func_first, first);
    assert_eq!(program.types.len(), 2);
}

#[test]
fn test_type_rep() {
    let mut program = Program::new();
    let i32_id = program.find_or_add_type(Type::i32());
    let main_type = program.find_or_add_type(Type::Func(FuncType {
        parameters: vec![FuncParameter {
            name: "exitCode".to_string(),
            direction: ParameterDirection::Out,
            type_id: i32_id,
        }],
    }));

    assert_eq!(program.type_rep(i32_id), "i32");
    assert_eq!(program.type_rep(main_type), "fun(out exitCode: i32)");

    let two_params = program.find_or_add_type(Type::Func(FuncType {
        parameters: vec![
            FuncParameter {
                name: "x".to_string(),
                direction: ParameterDirection::In,
                type_id: i32_id,
            },
            FuncParameter {
                name: "r".to_string(),
                direction: ParameterDirection::Out,
                type_id: i32_id,
            },
        ],
    }));
    assert_eq!(program.type_rep(two_params), "fun(in x: i32, out r: i32)");
}
