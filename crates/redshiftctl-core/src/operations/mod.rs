//! Descriptors for every supported Redshift operation
//!
//! | Descriptor                       | Mutating | Payload                   |
//! |----------------------------------|----------|---------------------------|
//! | [`ModifyClusterSubnetGroup`]     | yes      | cluster subnet group      |
//! | [`EnableLogging`]                | yes      | logging status            |
//! | [`DisableLogging`]               | yes      | logging status            |
//! | [`DescribeLoggingStatus`]        | no       | logging status            |
//! | [`DescribeEventCategories`]      | no       | event categories map list |
//! | [`CreateTags`]                   | yes      | none (pass-thru: ARN)     |
//! | [`DeleteTags`]                   | yes      | none (pass-thru: ARN)     |
//! | [`PurchaseReservedNodeOffering`] | yes      | reserved node             |
//! | [`RebootCluster`]                | yes      | cluster                   |
//! | [`DeleteClusterSecurityGroup`]   | yes      | none (pass-thru: name)    |
//! | [`DescribeResize`]               | no       | resize progress           |

pub mod cluster;
pub mod events;
pub mod logging;
pub mod reserved_node;
pub mod security_group;
pub mod subnet_group;
pub mod tags;

pub use cluster::*;
pub use events::*;
pub use logging::*;
pub use reserved_node::*;
pub use security_group::*;
pub use subnet_group::*;
pub use tags::*;
