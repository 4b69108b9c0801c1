mod encoder_tests;
