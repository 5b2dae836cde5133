mod hallucination_filter_test;
mod session_limiter_test;
