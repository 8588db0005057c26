/*!
# Stellar 3D Engine

Core of a real-time 3D engine: per-frame physics stepping, frustum culling,
batched and instanced draws, and cascaded shadow maps.

The GPU and the window are reached only through the `GraphicsDevice`,
`CommandList` and `Window` traits; a backend crate provides the OpenGL side.

## Architecture

- **Renderer**: frame orchestrator (physics, view, shadows, cull, color pass)
- **ShadowRenderer**: cascade fitting and the depth pass
- **Scene**: entities batched per mesh, lights, fog, sky box
- **PhysicsSpace**: fixed-step rigid-body world (rapier backend)
- **FrustumCullingFilter**: conservative sphere culling
- **GameLoop**: fixed-rate updates around variable-rate rendering
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod config;
pub mod graphics_device;
pub mod window;
pub mod transform;
pub mod camera;
pub mod resource;
pub mod scene;
pub mod physics;
pub mod shadow;
pub mod renderer;
pub mod game_loop;

// Main stellar3d namespace module
pub mod stellar3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Frame orchestrator
    pub use crate::renderer::{Renderer, FrameContext, FrameStats, RendererShaders};

    // Game loop and window seam
    pub use crate::game_loop::{GameLogic, GameLoop, Timer};
    pub use crate::window::Window;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    pub mod config {
        pub use crate::config::*;
    }

    // GPU collaborator traits
    pub mod gpu {
        pub use crate::graphics_device::*;
    }

    pub mod camera {
        pub use crate::camera::*;
        pub use crate::transform::Transformation;
    }

    pub mod resource {
        pub use crate::resource::*;
    }

    pub mod scene {
        pub use crate::scene::*;
    }

    pub mod physics {
        pub use crate::physics::*;
    }

    pub mod shadow {
        pub use crate::shadow::*;
    }
}

// Re-export math library at crate root
pub use glam;
