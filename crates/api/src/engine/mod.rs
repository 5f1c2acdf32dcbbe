//! Job submission engine.
//!
//! Submitting a job is a two-step protocol: a durable write to the job
//! store followed by a best-effort notification on the event bus. See
//! [`submission::submit`].

pub mod submission;

pub use submission::{submit, NotifyOutcome, PublishStats, Submission};
