mod speech_tests;
mod support;
