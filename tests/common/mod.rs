// Common test utilities for session integration tests
//
// Shared configuration and helpers for driving sessions through the
// headless backend.

#![allow(dead_code)]

use circle_demo::display::{Event, HeadlessBackend, SessionConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

/// Seed used when a test doesn't care about the exact circles
pub const DEFAULT_SEED: u64 = 0x5EED;

/// 640x480 configuration with no frame delay
pub fn test_config() -> SessionConfig {
    SessionConfig::new()
        .with_size(640, 480)
        .with_frame_delay(Duration::ZERO)
}

/// Deterministic random source
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Headless backend with one frame of events per entry in `frames`
pub fn scripted_backend(frames: &[&[Event]]) -> HeadlessBackend {
    frames
        .iter()
        .fold(HeadlessBackend::new(), |backend, events| {
            backend.with_frame(events.iter().copied())
        })
}
