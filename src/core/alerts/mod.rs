//! Alert lifecycle: persistence seam, expiry scheduler and real-time fan-out

pub mod channel;
pub mod scheduler;
pub mod store;
pub mod types;
pub mod validation;

pub use channel::{
    AlertChannel, AlertSink, InboundMessage, OutboundMessage, PublishReport, QueueSink,
    SubscriberId, Subscription,
};
pub use scheduler::{AlertExpiryScheduler, expire_alerts};
pub use store::{AlertRepository, AlertStore};
pub use types::{
    Alert, AlertId, CATEGORIES, Category, Feature, FeatureCollection, Geometry, NewAlert,
};
pub use validation::{AlertReport, ValidatedReport, parse_coordinates};
