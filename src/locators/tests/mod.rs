mod locate_tests;
