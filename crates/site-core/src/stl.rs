//! STL mesh decoding (binary and ASCII).
//!
//! Output is a non-indexed triangle list: three vertices per facet, each
//! carrying the facet normal.

use thiserror::Error;

const BINARY_HEADER_LEN: usize = 80;
const BINARY_PREAMBLE_LEN: usize = BINARY_HEADER_LEN + 4;
const BINARY_FACET_LEN: usize = 50;

#[derive(Debug, Error, PartialEq)]
pub enum StlError {
    #[error("stl data too short ({0} bytes)")]
    TooShort(usize),
    #[error("binary stl truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("ascii stl is not valid utf-8")]
    Encoding,
    #[error("ascii stl line {line}: {message}")]
    Malformed { line: usize, message: String },
    #[error("stl contains no triangles")]
    Empty,
}

/// Interleaved vertex as uploaded to the GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct MeshGeometry {
    pub vertices: Vec<MeshVertex>,
}

impl MeshGeometry {
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn positions(&self) -> impl Iterator<Item = glam::Vec3> + '_ {
        self.vertices.iter().map(|v| glam::Vec3::from(v.position))
    }

    /// Shift every vertex by `offset`.
    pub fn translate(&mut self, offset: glam::Vec3) {
        for v in &mut self.vertices {
            let p = glam::Vec3::from(v.position) + offset;
            v.position = p.to_array();
        }
    }

    fn push_facet(&mut self, normal: [f32; 3], corners: [[f32; 3]; 3]) {
        let normal = facet_normal(normal, &corners);
        for position in corners {
            self.vertices.push(MeshVertex { position, normal });
        }
    }
}

/// Decode STL bytes, choosing binary or ASCII from the content.
pub fn parse_stl(bytes: &[u8]) -> Result<MeshGeometry, StlError> {
    let geometry = if is_binary(bytes) {
        parse_binary(bytes)?
    } else {
        parse_ascii(bytes)?
    };
    if geometry.vertices.is_empty() {
        return Err(StlError::Empty);
    }
    log::debug!("[stl] decoded {} triangles", geometry.triangle_count());
    Ok(geometry)
}

// Binary when the length matches the declared facet count; otherwise a
// file starting with "solid" is ASCII. Some exporters write "solid" into
// binary headers, hence the length check first.
fn is_binary(bytes: &[u8]) -> bool {
    if bytes.len() >= BINARY_PREAMBLE_LEN {
        let count = read_u32(bytes, BINARY_HEADER_LEN);
        if binary_len(count) == bytes.len() as u64 {
            return true;
        }
    }
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    !bytes[start..].starts_with(b"solid")
}

fn parse_binary(bytes: &[u8]) -> Result<MeshGeometry, StlError> {
    if bytes.len() < BINARY_PREAMBLE_LEN {
        return Err(StlError::TooShort(bytes.len()));
    }
    let declared = read_u32(bytes, BINARY_HEADER_LEN);
    let expected = binary_len(declared);
    if (bytes.len() as u64) < expected {
        return Err(StlError::Truncated {
            expected: expected as usize,
            actual: bytes.len(),
        });
    }
    let count = declared as usize;
    let mut geometry = MeshGeometry {
        vertices: Vec::with_capacity(count * 3),
    };
    for i in 0..count {
        let base = BINARY_PREAMBLE_LEN + i * BINARY_FACET_LEN;
        let normal = read_vec3(bytes, base);
        let corners = [
            read_vec3(bytes, base + 12),
            read_vec3(bytes, base + 24),
            read_vec3(bytes, base + 36),
        ];
        geometry.push_facet(normal, corners);
    }
    Ok(geometry)
}

fn parse_ascii(bytes: &[u8]) -> Result<MeshGeometry, StlError> {
    let text = std::str::from_utf8(bytes).map_err(|_| StlError::Encoding)?;
    let mut geometry = MeshGeometry::default();
    let mut normal = [0.0f32; 3];
    let mut corners: Vec<[f32; 3]> = Vec::with_capacity(3);
    let mut in_facet = false;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let mut tokens = raw.split_whitespace();
        let Some(keyword) = tokens.next() else {
            continue;
        };
        match keyword {
            "facet" => {
                if tokens.next() != Some("normal") {
                    return Err(malformed(line_no, "expected 'facet normal'"));
                }
                normal = parse_floats(tokens, line_no)?;
                corners.clear();
                in_facet = true;
            }
            "vertex" => {
                if !in_facet {
                    return Err(malformed(line_no, "vertex outside facet"));
                }
                if corners.len() == 3 {
                    return Err(malformed(line_no, "more than three vertices in facet"));
                }
                corners.push(parse_floats(tokens, line_no)?);
            }
            "endfacet" => {
                if corners.len() != 3 {
                    return Err(malformed(
                        line_no,
                        &format!("facet has {} vertices", corners.len()),
                    ));
                }
                geometry.push_facet(normal, [corners[0], corners[1], corners[2]]);
                in_facet = false;
            }
            "solid" | "endsolid" | "outer" | "endloop" => {}
            other => {
                return Err(malformed(line_no, &format!("unexpected keyword '{}'", other)));
            }
        }
    }
    if in_facet {
        return Err(StlError::Malformed {
            line: text.lines().count(),
            message: "unterminated facet".to_string(),
        });
    }
    Ok(geometry)
}

fn parse_floats<'a>(
    mut tokens: impl Iterator<Item = &'a str>,
    line: usize,
) -> Result<[f32; 3], StlError> {
    let mut out = [0.0f32; 3];
    for slot in &mut out {
        let tok = tokens
            .next()
            .ok_or_else(|| malformed(line, "expected three numbers"))?;
        *slot = tok
            .parse::<f32>()
            .map_err(|_| malformed(line, &format!("invalid number '{}'", tok)))?;
    }
    Ok(out)
}

fn malformed(line: usize, message: &str) -> StlError {
    StlError::Malformed {
        line,
        message: message.to_string(),
    }
}

// Computed in u64 so a garbage count cannot overflow on 32-bit targets.
#[inline]
fn binary_len(count: u32) -> u64 {
    BINARY_PREAMBLE_LEN as u64 + count as u64 * BINARY_FACET_LEN as u64
}

#[inline]
fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

#[inline]
fn read_f32(bytes: &[u8], at: usize) -> f32 {
    f32::from_bits(read_u32(bytes, at))
}

#[inline]
fn read_vec3(bytes: &[u8], at: usize) -> [f32; 3] {
    [
        read_f32(bytes, at),
        read_f32(bytes, at + 4),
        read_f32(bytes, at + 8),
    ]
}

// Exporters frequently leave the stored normal zeroed; fall back to the winding.
fn facet_normal(stored: [f32; 3], corners: &[[f32; 3]; 3]) -> [f32; 3] {
    let n = glam::Vec3::from(stored);
    if n.length_squared() > 1e-12 {
        return n.normalize().to_array();
    }
    let a = glam::Vec3::from(corners[0]);
    let b = glam::Vec3::from(corners[1]);
    let c = glam::Vec3::from(corners[2]);
    (b - a).cross(c - a).normalize_or_zero().to_array()
}
