//! AddMath Core - crop pipeline and application state
//!
//! This crate provides the platform-independent parts of the AddMath tutor:
//! decoding and cropping problem photos, the persisted application document,
//! the request boundary to the solving service, and dashboard statistics.

pub mod config;
pub mod decode;
pub mod encode;
pub mod pipeline;
pub mod profile;
pub mod session;
pub mod solver;
pub mod stats;
pub mod store;
pub mod transform;

pub use config::{ConfigError, PipelineConfig};
pub use decode::{decode_data_url, decode_image, DecodeError, DecodedImage};
pub use encode::{EncodeError, EncodedImage, DEFAULT_JPEG_QUALITY};
pub use pipeline::{crop, crop_data_url, crop_with_config, render, CropError, CropParams};
pub use profile::{register_profile, AuthMode, ProfileError, ProfileForm};
pub use session::{AspectConstraint, CropSession};
pub use solver::{submit_problem, SolveError, SolveRequest, Solver, SubmitError};
pub use stats::{daily_solved, distinct_topics, AdminSummary, DailyCount, DashboardSummary};
pub use store::{
    AppState, Feedback, FileStore, Language, MathProblem, MemoryStore, StateStore, StoreError,
    User, UserRole,
};
pub use transform::{
    apply_crop, apply_rotation, compute_rotated_bounds, CropRegion, Flip, InterpolationFilter,
    SurfaceLimits, TransformError,
};

/// Crate version, as reported to the host.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
