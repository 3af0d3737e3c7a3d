/// Task service data models
///
/// - `task`: Task records, the joined view returned to clients, create/update inputs
/// - `status`: Lifecycle labels referenced by tasks

pub mod status;
pub mod task;
