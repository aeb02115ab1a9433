//! Unified operator capability surface for inbound adapters.

use super::deployment::DeploymentOperator;
use super::observation::ObservationOperator;

/// Unified operator capability surface consumed by inbound adapters.
pub trait OperatorPort: DeploymentOperator + ObservationOperator {}

impl<T> OperatorPort for T where T: DeploymentOperator + ObservationOperator {}
