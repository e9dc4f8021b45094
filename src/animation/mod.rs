pub mod camera;
pub mod easing;

// Re-export commonly used types for convenience
pub use camera::CameraAnimation;
pub use easing::EasingType;
