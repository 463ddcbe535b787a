// ABOUTME: Application constants grouped by domain
// ABOUTME: Ports, upstream defaults, timeouts, vitals ranges, and SSE protocol literals
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Constants module
//!
//! Constants are grouped into small domain modules rather than one flat list.

use std::env;

/// Environment-based configuration
pub mod env_config {
    use super::{defaults, env};

    /// Get bind address from environment or default
    #[must_use]
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| defaults::HOST.to_owned())
    }
}

/// Default values for configuration
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 5001;
    /// Default bind address
    pub const HOST: &str = "0.0.0.0";
    /// Default stream emission period in seconds (30 minutes)
    pub const STREAM_INTERVAL_SECS: u64 = 30 * 60;
    /// Default `OpenAI` API base URL
    pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
    /// Default model for recommendations
    pub const OPENAI_MODEL: &str = "gpt-4o";
    /// Token budget for one recommendation
    pub const RECOMMENDATION_MAX_TOKENS: u32 = 150;
}

/// Timeout configurations
pub mod timeouts {
    /// Upper bound on one recommendation call in seconds
    pub const RECOMMENDATION_TIMEOUT_SECS: u64 = 10;
    /// LLM client connect timeout in seconds
    pub const LLM_CONNECT_TIMEOUT_SECS: u64 = 5;
}

/// Security configurations
pub mod security {
    /// CORS allowed origins
    pub const CORS_ALLOWED_ORIGINS: &str = "*";
}

/// Synthetic vitals ranges (inclusive)
pub mod vitals {
    use std::ops::RangeInclusive;

    /// Systolic blood pressure in mmHg
    pub const SYSTOLIC_RANGE: RangeInclusive<u32> = 80..=129;
    /// Diastolic blood pressure in mmHg
    pub const DIASTOLIC_RANGE: RangeInclusive<u32> = 60..=89;
    /// Daily step count
    pub const STEPS_RANGE: RangeInclusive<u32> = 0..=9999;
}

/// Server-Sent Events protocol literals
pub mod sse {
    /// Content type negotiated for event streams
    pub const CONTENT_TYPE: &str = "text/event-stream";
    /// Cache-Control value for event streams
    pub const CACHE_CONTROL: &str = "no-cache";
    /// Connection header value for event streams
    pub const CONNECTION: &str = "keep-alive";
    /// Comment frame sent in place of a snapshot that failed to assemble
    pub const KEEPALIVE_FRAME: &str = ":keepalive\n\n";
    /// Frames buffered per connection before back-pressure applies
    pub const CHANNEL_CAPACITY: usize = 16;
}

/// Service names for structured logging
pub mod service_names {
    /// This server
    pub const PULSECARE_VITALS: &str = "pulsecare-vitals";
    /// Upstream text-generation service
    pub const OPENAI: &str = "OpenAI";
}
