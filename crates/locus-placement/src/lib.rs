//! locus-placement: data-locality scoring and placement verification.
//!
//! Given where a volume's replicas live, this crate scores every storage
//! host by proximity to the data and checks whether the host a workload
//! actually landed on is the best-scoring one. All operations are pure and
//! synchronous over an in-memory snapshot.
//!
//! # Components
//!
//! - **`scorer`**: Per-host locality scores (node, rack, zone, region)
//! - **`verifier`**: Winner selection with deterministic tie-break
//! - **`convert`**: Compute node → storage hostname resolution
//! - **`check`**: End-to-end check driven by a [`CheckPolicy`]
//! - **`report`**: Text rendering for the CLI

pub mod check;
pub mod convert;
pub mod error;
pub mod report;
pub mod scorer;
pub mod verifier;

pub use check::{CheckOutcome, CheckPolicy, check_placement};
pub use convert::resolve_hostname;
pub use error::{PlacementError, PlacementResult};
pub use scorer::{ScoreReport, ScoreTable, TierWeights, UnresolvedOwner, score_volume, score_workload};
pub use verifier::{Verdict, verify};
