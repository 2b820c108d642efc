//! Shader validation.
//!
//! Generated WGSL is parsed and validated with naga before it reaches the
//! device, so a broken effect produces a readable [`ShaderError`] instead of
//! a wgpu validation panic. Everything built after validation (module,
//! buffers, pipeline) is covered by the host's error scope, settled by
//! [`settle_scope`].

use crate::error::ShaderError;

/// Parse and validate WGSL source.
pub fn validate_wgsl(effect: &'static str, source: &str) -> Result<naga::Module, ShaderError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ShaderError {
        effect,
        message: format!("WGSL parse error: {}", e.emit_to_string(source)),
    })?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    );
    validator.validate(&module).map_err(|e| ShaderError {
        effect,
        message: format!("WGSL validation error: {:?}", e),
    })?;

    Ok(module)
}

/// Validate `source`, then create the shader module.
pub fn create_validated_module(
    device: &wgpu::Device,
    effect: &'static str,
    source: &str,
) -> Result<wgpu::ShaderModule, ShaderError> {
    validate_wgsl(effect, source)?;
    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(effect),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    }))
}

/// Combine a build result with the error popped from its validation scope.
///
/// A build that returned `Ok` but tripped the scope is handed to `release`
/// and reported as a [`ShaderError`] for `effect`.
pub fn settle_scope<T>(
    effect: &'static str,
    built: Result<T, ShaderError>,
    scope_error: Option<String>,
    release: impl FnOnce(T),
) -> Result<T, ShaderError> {
    match (built, scope_error) {
        (Err(e), _) => Err(e),
        (Ok(value), Some(message)) => {
            release(value);
            Err(ShaderError { effect, message })
        }
        (Ok(value), None) => Ok(value),
    }
}
