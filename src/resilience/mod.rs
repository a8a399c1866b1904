//! 弹性模块：为两次外部调用提供固定间隔的线性重试。
//!
//! # Resilience Module
//!
//! Fixed linear retry for the two outbound calls.
//!
//! Two scopes exist on purpose and are kept apart:
//!
//! | Scope | Retries | Used by |
//! |-------|---------|---------|
//! | [`RetryScope::NetworkOnly`] | transport failures only | voice lookup |
//! | [`RetryScope::AnyFailure`] | every failure, decode included | speech synthesis |
//!
//! ```rust
//! use elevenlabs_nodes::resilience::{RetryPolicy, RetryScope};
//! use std::time::Duration;
//!
//! let policy = RetryPolicy::network_only().with_delay(Duration::from_millis(10));
//! assert_eq!(policy.max_attempts(), 3);
//! assert_eq!(policy.scope(), RetryScope::NetworkOnly);
//! ```

pub mod retry;

pub use retry::{RetryPolicy, RetryScope};
