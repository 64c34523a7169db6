pub mod sprite2png;
