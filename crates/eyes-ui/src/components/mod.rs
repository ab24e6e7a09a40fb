pub mod card;
pub mod gauge;
pub mod nav;
pub mod status;
pub mod toast;
