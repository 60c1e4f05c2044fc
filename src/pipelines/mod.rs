//! Render pipelines and shader compilation.
//!
//! - `basic` holds the shared pipeline constructor
//! - `points` is the pass-through colour pipeline drawn as a point list
//! - `terrain` is the camera-driven heightmap pipeline with height banding

use std::borrow::Cow;

pub mod basic;
pub mod points;
pub mod terrain;

/// Outcome of compiling one shader module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompileStatus {
    Success,
    Failed(String),
}

impl CompileStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, CompileStatus::Success)
    }
}

/// A shader module together with the status reported by the backend compiler.
///
/// A failed module is still returned: pipelines built from it render nothing
/// useful, but the demo keeps running.
#[derive(Debug)]
pub struct CompiledShader {
    pub module: wgpu::ShaderModule,
    pub status: CompileStatus,
}

/// Compile WGSL source and log whether compilation succeeded.
pub fn compile_shader(device: &wgpu::Device, label: &str, source: Cow<'_, str>) -> CompiledShader {
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source),
    });
    // Resolves immediately on the GL and native backends the context requests.
    let info = futures::executor::block_on(module.get_compilation_info());
    let status = compile_status(&info);
    match &status {
        CompileStatus::Success => log::info!("Shader {} compiled successfully.", label),
        CompileStatus::Failed(log) => log::error!("Shader {} compilation failed:\n{}", label, log),
    }
    CompiledShader { module, status }
}

fn compile_status(info: &wgpu::CompilationInfo) -> CompileStatus {
    let errors: Vec<String> = info
        .messages
        .iter()
        .filter(|m| matches!(m.message_type, wgpu::CompilationMessageType::Error))
        .map(|m| match &m.location {
            Some(loc) => format!("{}:{}: {}", loc.line_number, loc.line_position, m.message),
            None => m.message.clone(),
        })
        .collect();
    if errors.is_empty() {
        CompileStatus::Success
    } else {
        CompileStatus::Failed(errors.join("\n"))
    }
}
