//! Column names and roles for the interaction-log schema

pub const USER_ID: &str = "user_id";
pub const PROBLEM_ID: &str = "problem_id";
pub const TEMPLATE_ID: &str = "template_id";
pub const SKILL_ID: &str = "skill_id";
pub const SKILL_NAME: &str = "skill_name";
pub const TEACHER_ID: &str = "teacher_id";
pub const STUDENT_CLASS_ID: &str = "student_class_id";
pub const SCHOOL_ID: &str = "school_id";
pub const CORRECT: &str = "correct";
pub const ATTEMPT_COUNT: &str = "attempt_count";
pub const MS_FIRST_RESPONSE: &str = "ms_first_response";
pub const HINT_COUNT: &str = "hint_count";
pub const HINT_TOTAL: &str = "hint_total";
pub const HINT_INDEPENDENCE: &str = "hint_independence";

/// Identifier columns: categorical values, never arithmetic.
pub const IDENTIFIER_COLUMNS: [&str; 8] = [
    USER_ID,
    PROBLEM_ID,
    TEMPLATE_ID,
    SKILL_ID,
    SKILL_NAME,
    TEACHER_ID,
    STUDENT_CLASS_ID,
    SCHOOL_ID,
];

/// Columns whose missingness disqualifies the entire row.
pub const CRITICAL_COLUMNS: [&str; 10] = [
    USER_ID,
    PROBLEM_ID,
    TEMPLATE_ID,
    SKILL_ID,
    SKILL_NAME,
    TEACHER_ID,
    STUDENT_CLASS_ID,
    SCHOOL_ID,
    HINT_COUNT,
    HINT_TOTAL,
];

/// Count-like columns cast to integers during type coercion.
pub const COUNT_COLUMNS: [&str; 5] = [
    ATTEMPT_COUNT,
    MS_FIRST_RESPONSE,
    HINT_COUNT,
    HINT_TOTAL,
    CORRECT,
];

/// Fixed output projection, in order.
pub const OUTPUT_COLUMNS: [&str; 14] = [
    USER_ID,
    PROBLEM_ID,
    TEMPLATE_ID,
    SKILL_ID,
    SKILL_NAME,
    TEACHER_ID,
    STUDENT_CLASS_ID,
    SCHOOL_ID,
    CORRECT,
    ATTEMPT_COUNT,
    MS_FIRST_RESPONSE,
    HINT_COUNT,
    HINT_TOTAL,
    HINT_INDEPENDENCE,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_critical_columns_cover_identifiers() {
        for col in IDENTIFIER_COLUMNS {
            assert!(CRITICAL_COLUMNS.contains(&col));
        }
        assert!(CRITICAL_COLUMNS.contains(&HINT_COUNT));
        assert!(CRITICAL_COLUMNS.contains(&HINT_TOTAL));
    }

    #[test]
    fn test_output_columns_order() {
        assert_eq!(OUTPUT_COLUMNS[0], USER_ID);
        assert_eq!(OUTPUT_COLUMNS[8], CORRECT);
        assert_eq!(OUTPUT_COLUMNS[13], HINT_INDEPENDENCE);
    }
}
