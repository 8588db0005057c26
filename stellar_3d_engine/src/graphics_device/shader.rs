/// Shader program trait and descriptor

/// Pipeline stage a shader source belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

/// One stage's source code
#[derive(Debug, Clone)]
pub struct ShaderSource {
    pub stage: ShaderStage,
    pub code: String,
}

/// Descriptor for compiling and linking a program
#[derive(Debug, Clone)]
pub struct ShaderProgramDesc {
    /// Debug name (appears in diagnostics)
    pub name: String,
    pub stages: Vec<ShaderSource>,
}

impl ShaderProgramDesc {
    /// Vertex + fragment program
    pub fn new(name: &str, vertex: &str, fragment: &str) -> Self {
        Self {
            name: name.to_string(),
            stages: vec![
                ShaderSource { stage: ShaderStage::Vertex, code: vertex.to_string() },
                ShaderSource { stage: ShaderStage::Fragment, code: fragment.to_string() },
            ],
        }
    }
}

/// Linked GPU program. Opaque to the engine beyond its name.
pub trait ShaderProgram: Send + Sync {
    fn name(&self) -> &str;
}
