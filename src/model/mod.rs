pub mod keys;
pub mod media;
pub mod player;
pub mod types;

pub use media::MediaModel;
pub use player::PlayerModel;
