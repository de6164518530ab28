//! Employee lifecycle and workload rebalancing

pub mod credential;
pub mod error;
pub mod paginator;
pub mod rebalancer;
pub mod service;
pub mod worker;

pub use credential::{Argon2Hasher, CredentialHasher};
pub use error::{ServiceError, ServiceResult};
pub use paginator::{OutOfRangePage, PageBounds, paginate};
pub use rebalancer::WorkloadRebalancer;
pub use service::{EmployeeService, RebalanceMode};
pub use worker::{DeadLetters, RebalanceJob, RebalanceQueue, RebalanceWorker, RetryPolicy};
