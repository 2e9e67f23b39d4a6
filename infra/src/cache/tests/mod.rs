mod redis_client_tests;
mod session_store_tests;
