pub mod booking;
pub mod equipment;
pub mod payment;
pub mod settings;
pub mod system_config;
pub mod user;

pub use booking::{Booking, BookingStatus, Studio};
pub use equipment::Equipment;
pub use payment::{Payment, PaymentCard, PaymentMethod, PaymentStatus};
pub use settings::UserSettings;
pub use system_config::SystemConfig;
pub use user::{ClientTier, Dashboard, User, UserRole};
