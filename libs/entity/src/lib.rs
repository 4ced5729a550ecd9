pub mod event;

pub mod prelude {
    pub use crate::event::Event as EventEntity;
    pub use crate::event::IdentityKey;
}
