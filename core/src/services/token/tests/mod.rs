mod key_tests;
