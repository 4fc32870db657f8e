//! Screen plumbing shared by every controller

pub mod banner;
pub mod clock;
pub mod context;
pub mod lifecycle;
pub mod live;

pub use banner::{clear_if_expired, Banner, BannerKind, BannerSlot};
pub use clock::{Clock, MockClock, SystemClock};
pub use context::ScreenContext;
pub use lifecycle::{decode_all, MountFlag, ScreenScope};
pub use live::LiveList;
