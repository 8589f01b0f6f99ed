//! Shader sources and the uniform/attribute contract they must honour.
//!
//! The vertex displacement itself is opaque here: any source pair that
//! declares the material uniforms and only consumes attributes the geometry
//! provides (including `aRandom`) is accepted.

use std::collections::BTreeSet;

use crate::error::{DemoError, Result};
use crate::geometry::RANDOM_ATTRIBUTE;
use crate::uniforms::{ENGINE_UNIFORMS, MATERIAL_UNIFORMS};

const VERTEX_SOURCE: &str = include_str!("shaders/vertex.glsl");
const FRAGMENT_SOURCE: &str = include_str!("shaders/fragment.glsl");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

/// Names a source pair declares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderInterface {
    pub uniforms: BTreeSet<String>,
    /// Vertex-stage inputs.
    pub attributes: BTreeSet<String>,
}

impl Default for ShaderSource {
    fn default() -> Self {
        Self::new(VERTEX_SOURCE, FRAGMENT_SOURCE)
    }
}

impl ShaderSource {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Collects top-level `uniform` and vertex `in` declarations.
    pub fn interface(&self) -> ShaderInterface {
        let mut interface = ShaderInterface::default();
        for (stage, source) in [(Stage::Vertex, &self.vertex), (Stage::Fragment, &self.fragment)] {
            for statement in statements(source) {
                let tokens: Vec<&str> = statement.split_whitespace().collect();
                let (Some(&first), Some(&last)) = (tokens.first(), tokens.last()) else {
                    continue;
                };
                let name = declared_name(last);
                match first {
                    "uniform" => {
                        interface.uniforms.insert(name);
                    }
                    "in" | "attribute" if stage == Stage::Vertex => {
                        interface.attributes.insert(name);
                    }
                    _ => {}
                }
            }
        }
        interface
    }

    /// Checks the sources against the material uniforms and the attributes
    /// the geometry supplies. Any mismatch is fatal.
    pub fn validate(&self, geometry_attributes: &[&str]) -> Result<ShaderInterface> {
        let interface = self.interface();

        let material: BTreeSet<&str> = interface
            .uniforms
            .iter()
            .map(String::as_str)
            .filter(|name| !ENGINE_UNIFORMS.contains(name))
            .collect();
        let expected: BTreeSet<&str> = MATERIAL_UNIFORMS.into_iter().collect();
        if let Some(missing) = expected.difference(&material).next() {
            return Err(DemoError::ContractViolation(format!(
                "uniform `{missing}` is not declared"
            )));
        }
        if let Some(extra) = material.difference(&expected).next() {
            return Err(DemoError::ContractViolation(format!(
                "uniform `{extra}` is not part of the material"
            )));
        }

        if let Some(unknown) = interface
            .attributes
            .iter()
            .find(|name| !geometry_attributes.contains(&name.as_str()))
        {
            return Err(DemoError::ContractViolation(format!(
                "attribute `{unknown}` is not provided by the geometry"
            )));
        }
        if !interface.attributes.contains(RANDOM_ATTRIBUTE) {
            return Err(DemoError::ContractViolation(format!(
                "vertex shader does not consume `{RANDOM_ATTRIBUTE}`"
            )));
        }

        Ok(interface)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Vertex,
    Fragment,
}

/// `uTime` -> `uTime`, `uLights[4]` -> `uLights`.
fn declared_name(token: &str) -> String {
    token.split('[').next().unwrap_or(token).to_string()
}

/// `;`-terminated statements with comments and preprocessor lines removed.
/// Text up to the last brace is dropped so a declaration following a block
/// still starts with its qualifier.
fn statements(source: &str) -> Vec<String> {
    let code = strip_comments(source);
    let code = code
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n");
    code.split(';')
        .map(|statement| {
            statement
                .rsplit(|c| c == '{' || c == '}')
                .next()
                .unwrap_or(statement)
                .to_string()
        })
        .collect()
}

fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    loop {
        let (start, block) = match (rest.find("//"), rest.find("/*")) {
            (None, None) => {
                out.push_str(rest);
                return out;
            }
            (Some(line), Some(block)) if block < line => (block, true),
            (Some(line), _) => (line, false),
            (None, Some(block)) => (block, true),
        };
        out.push_str(&rest[..start]);
        if block {
            // a block comment separates tokens
            out.push(' ');
            let body = &rest[start + 2..];
            rest = body.find("*/").map_or("", |end| &body[end + 2..]);
        } else {
            let body = &rest[start..];
            rest = body.find('\n').map_or("", |end| &body[end..]);
        }
    }
}
