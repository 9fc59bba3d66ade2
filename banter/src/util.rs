//! Small construction and conversion helpers for facade consumers.

use bpricing::UsageBreakdown;
use bprovider::{CompletionResult, Role, Turn};

pub fn user_turn(content: impl Into<String>) -> Turn {
    Turn::new(Role::User, content)
}

pub fn assistant_turn(content: impl Into<String>) -> Turn {
    Turn::new(Role::Assistant, content)
}

pub fn system_turn(content: impl Into<String>) -> Turn {
    Turn::new(Role::System, content)
}

/// Adapts a completion result's counters into the estimator's usage shape.
pub fn usage_breakdown(result: &CompletionResult) -> UsageBreakdown {
    UsageBreakdown::new(
        i64::from(result.usage.input_tokens),
        i64::from(result.usage.cached_input_tokens),
        i64::from(result.usage.output_tokens),
        i64::from(result.usage.reasoning_tokens),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bprovider::TokenUsage;

    #[test]
    fn turn_helpers_tag_the_expected_roles() {
        assert_eq!(user_turn("hi").role, Role::User);
        assert_eq!(assistant_turn("hi").role, Role::Assistant);
        assert_eq!(system_turn("hi").role, Role::System);
    }

    #[test]
    fn usage_breakdown_copies_all_counters() {
        let result = CompletionResult::success(
            Some("ok".to_string()),
            TokenUsage {
                input_tokens: 12,
                cached_input_tokens: 4,
                output_tokens: 5,
                reasoning_tokens: 2,
            },
        );

        let usage = usage_breakdown(&result);
        assert_eq!(usage.input_tokens, 12);
        assert_eq!(usage.cached_input_tokens, 4);
        assert_eq!(usage.output_tokens, 5);
        assert_eq!(usage.reasoning_tokens, 2);
    }
}
