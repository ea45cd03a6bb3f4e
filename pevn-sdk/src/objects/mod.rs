pub mod invocation;
pub mod notification;
pub mod processed;
pub mod raw_event;

pub use invocation::{
    NOTIFICATION_SENT, NormalizerResponse, NotificationDetails, NotifierRequest, NotifierResponse,
};
pub use notification::{
    DeliveryReceipt, DeploymentBody, GenericBody, Notification, NotificationBody, TopicMessage,
};
pub use processed::{GenericEvent, ProcessedEvent, ServiceDeploymentEvent};
pub use raw_event::RawEvent;
