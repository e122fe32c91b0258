pub mod aggro;
pub mod attack;
pub mod collide;
pub mod grid;
pub mod jump;
pub mod motion;
pub mod tile;
