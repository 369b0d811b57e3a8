#![no_main]

use enrollnet_core::model::{normalize_courses, normalize_student_id, parse_course_code};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = normalize_student_id(text);

    // Anything accepted must already be in canonical form.
    if let Ok(code) = parse_course_code(text) {
        assert_eq!(parse_course_code(&code).as_deref(), Ok(code.as_str()));
    }

    if let Ok(courses) = normalize_courses(text.split(',')) {
        assert!(!courses.is_empty());
    }
});
