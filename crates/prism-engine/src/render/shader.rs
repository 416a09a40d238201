//! Shader compilation.
//!
//! WGSL is parsed and validated with naga up front so a broken shader surfaces
//! as an error from scene setup instead of a device-level validation panic.

use std::borrow::Cow;

use anyhow::{Context, Result};

use crate::scene::ShaderSource;

/// Parses and validates `source`, checking that both entry points exist with
/// the expected stages.
pub fn validate(source: &ShaderSource) -> Result<naga::Module> {
    let module = naga::front::wgsl::parse_str(source.wgsl).map_err(|e| {
        anyhow::anyhow!("{}: parse error\n{}", source.label, e.emit_to_string(source.wgsl))
    })?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::default(),
    )
    .validate(&module)
    .map_err(|e| {
        anyhow::anyhow!("{}: validation error\n{}", source.label, e.emit_to_string(source.wgsl))
    })?;

    for (entry, stage) in [
        (source.vs_entry, naga::ShaderStage::Vertex),
        (source.fs_entry, naga::ShaderStage::Fragment),
    ] {
        module
            .entry_points
            .iter()
            .find(|ep| ep.name == entry && ep.stage == stage)
            .with_context(|| format!("{}: missing {stage:?} entry point `{entry}`", source.label))?;
    }

    Ok(module)
}

/// Validates `source` and creates the GPU shader module.
pub fn compile(device: &wgpu::Device, source: &ShaderSource) -> Result<wgpu::ShaderModule> {
    validate(source)?;

    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(source.label),
        source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(source.wgsl)),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{FLAT_COLOR_SHADER, TEXTURED_SHADER, TRANSFORMED_COLOR_SHADER};

    fn vertex_input_locations(module: &naga::Module) -> Vec<u32> {
        let ep = module
            .entry_points
            .iter()
            .find(|ep| ep.stage == naga::ShaderStage::Vertex)
            .unwrap();

        let mut locations = Vec::new();
        for arg in &ep.function.arguments {
            match &module.types[arg.ty].inner {
                naga::TypeInner::Struct { members, .. } => {
                    for m in members {
                        if let Some(naga::Binding::Location { location, .. }) = &m.binding {
                            locations.push(*location);
                        }
                    }
                }
                _ => {
                    if let Some(naga::Binding::Location { location, .. }) = &arg.binding {
                        locations.push(*location);
                    }
                }
            }
        }
        locations.sort_unstable();
        locations
    }

    #[test]
    fn bundled_shaders_validate() {
        for src in [FLAT_COLOR_SHADER, TRANSFORMED_COLOR_SHADER, TEXTURED_SHADER] {
            validate(&src).unwrap_or_else(|e| panic!("{e:#}"));
        }
    }

    #[test]
    fn vertex_inputs_match_layout_locations() {
        for src in [FLAT_COLOR_SHADER, TRANSFORMED_COLOR_SHADER, TEXTURED_SHADER] {
            let module = validate(&src).unwrap();
            assert_eq!(vertex_input_locations(&module), vec![0, 1], "{}", src.label);
        }
    }

    #[test]
    fn broken_source_is_an_error() {
        let src = ShaderSource {
            label: "broken",
            wgsl: "@vertex fn vs_main() -> @builtin(position) vec4<f32> { return 1.0; }",
            vs_entry: "vs_main",
            fs_entry: "fs_main",
        };
        let err = validate(&src).unwrap_err().to_string();
        assert!(err.contains("broken"));
    }

    #[test]
    fn optional_capabilities_are_rejected() {
        // f64 needs a device feature most adapters lack.
        let src = ShaderSource {
            label: "float64",
            wgsl: r#"
                @vertex
                fn vs_main() -> @builtin(position) vec4<f32> {
                    var x: f64 = 1.0lf;
                    return vec4<f32>(f32(x), 0.0, 0.0, 1.0);
                }

                @fragment
                fn fs_main() -> @location(0) vec4<f32> {
                    return vec4<f32>(1.0);
                }
            "#,
            vs_entry: "vs_main",
            fs_entry: "fs_main",
        };
        let err = validate(&src).unwrap_err().to_string();
        assert!(err.contains("float64"), "{err}");
    }

    #[test]
    fn missing_entry_point_is_an_error() {
        let src = ShaderSource {
            fs_entry: "main",
            ..FLAT_COLOR_SHADER
        };
        let err = format!("{:#}", validate(&src).unwrap_err());
        assert!(err.contains("`main`"), "{err}");
    }
}
