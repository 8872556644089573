/// Boilerplate `Event` impl for structs carrying a `header: EventHeader`.
macro_rules! impl_event {
    ($ty:ty) => {
        impl videotag_core::events::Event for $ty {
            fn event_id(&self) -> uuid::Uuid {
                self.header.event_id
            }

            fn parent_ids(&self) -> &[uuid::Uuid] {
                &self.header.parent_ids
            }

            fn event_type(&self) -> &'static str {
                Self::EVENT_TYPE
            }

            fn timestamp(&self) -> std::time::SystemTime {
                self.header.timestamp
            }

            fn as_any(&self) -> &dyn std::any::Any {
                self as &dyn std::any::Any
            }
        }
    };
}

pub(crate) use impl_event;

pub mod analysis_compiled;
pub mod analysis_progressed;
pub mod upload_progressed;
pub mod upload_rejected;
pub mod upload_requested;
pub mod video_uploaded;

pub use analysis_compiled::*;
pub use analysis_progressed::*;
pub use upload_progressed::*;
pub use upload_rejected::*;
pub use upload_requested::*;
pub use video_uploaded::*;

