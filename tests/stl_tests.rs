// Host-side tests for STL decoding.

use site_core::stl::*;

fn binary_stl(facets: &[([f32; 3], [[f32; 3]; 3])]) -> Vec<u8> {
    let mut out = vec![0u8; 80];
    out[..5].copy_from_slice(b"solid"); // binary files may still start with "solid"
    out.extend_from_slice(&(facets.len() as u32).to_le_bytes());
    for (normal, corners) in facets {
        for v in std::iter::once(normal).chain(corners.iter()) {
            for c in v {
                out.extend_from_slice(&c.to_le_bytes());
            }
        }
        out.extend_from_slice(&0u16.to_le_bytes());
    }
    out
}

const TRI: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

#[test]
fn decodes_binary_with_solid_header() {
    let bytes = binary_stl(&[([0.0, 0.0, 1.0], TRI), ([0.0, 0.0, 1.0], TRI)]);
    let geom = parse_stl(&bytes).unwrap();
    assert_eq!(geom.triangle_count(), 2);
    assert_eq!(geom.vertices.len(), 6);
    assert_eq!(geom.vertices[1].position, [1.0, 0.0, 0.0]);
    assert_eq!(geom.vertices[2].normal, [0.0, 0.0, 1.0]);
}

#[test]
fn zero_normals_fall_back_to_winding() {
    let bytes = binary_stl(&[([0.0, 0.0, 0.0], TRI)]);
    let geom = parse_stl(&bytes).unwrap();
    let n = geom.vertices[0].normal;
    assert!((n[2] - 1.0).abs() < 1e-6, "normal {:?}", n);
}

#[test]
fn stored_normals_are_normalised() {
    let bytes = binary_stl(&[([0.0, 3.0, 0.0], TRI)]);
    let geom = parse_stl(&bytes).unwrap();
    assert_eq!(geom.vertices[0].normal, [0.0, 1.0, 0.0]);
}

#[test]
fn truncated_binary_is_rejected() {
    let mut bytes = binary_stl(&[([0.0, 0.0, 1.0], TRI), ([0.0, 0.0, 1.0], TRI)]);
    bytes.truncate(bytes.len() - 10);
    // no longer matches the declared length and starts with "solid": read as ascii
    assert!(parse_stl(&bytes).is_err());

    let mut bytes = binary_stl(&[([0.0, 0.0, 1.0], TRI)]);
    bytes[..5].copy_from_slice(b"xxxxx");
    bytes.truncate(bytes.len() - 10);
    assert!(matches!(
        parse_stl(&bytes),
        Err(StlError::Truncated { expected: 134, actual: 124 })
    ));
}

#[test]
fn short_input_is_rejected() {
    assert_eq!(parse_stl(&[]).unwrap_err(), StlError::TooShort(0));
    assert_eq!(parse_stl(&[1, 2, 3]).unwrap_err(), StlError::TooShort(3));
}

#[test]
fn empty_binary_has_no_triangles() {
    let bytes = binary_stl(&[]);
    assert_eq!(parse_stl(&bytes).unwrap_err(), StlError::Empty);
}

const ASCII_CUBE_CORNER: &str = "solid corner
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 2 0 0
      vertex 0 2 0
    endloop
  endfacet
  facet normal 0 0 0
    outer loop
      vertex 0 0 0
      vertex 0 0 2
      vertex 2 0 0
    endloop
  endfacet
endsolid corner
";

#[test]
fn decodes_ascii() {
    let geom = parse_stl(ASCII_CUBE_CORNER.as_bytes()).unwrap();
    assert_eq!(geom.triangle_count(), 2);
    assert_eq!(geom.vertices[4].position, [0.0, 0.0, 2.0]);
    // second facet normal computed from winding: (0,0,2)x(2,0,0) = (0,4,0)
    let n = geom.vertices[3].normal;
    assert!((n[1] - 1.0).abs() < 1e-6, "normal {:?}", n);
}

#[test]
fn ascii_errors_carry_line_numbers() {
    let bad = "solid x\n facet normal 0 0 1\n outer loop\n vertex 0 0 zero\n";
    match parse_stl(bad.as_bytes()) {
        Err(StlError::Malformed { line, .. }) => assert_eq!(line, 4),
        other => panic!("unexpected {:?}", other),
    }

    let two_vertices = "solid x\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\nvertex 1 0 0\nendloop\nendfacet\nendsolid\n";
    match parse_stl(two_vertices.as_bytes()) {
        Err(StlError::Malformed { line, message }) => {
            assert_eq!(line, 7);
            assert!(message.contains("2 vertices"));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn ascii_without_facets_is_empty() {
    assert_eq!(
        parse_stl(b"solid nothing\nendsolid nothing\n").unwrap_err(),
        StlError::Empty
    );
}

#[test]
fn translate_moves_every_vertex() {
    let mut geom = parse_stl(ASCII_CUBE_CORNER.as_bytes()).unwrap();
    geom.translate(glam::Vec3::new(1.0, -1.0, 0.5));
    assert_eq!(geom.vertices[0].position, [1.0, -1.0, 0.5]);
    assert_eq!(geom.vertices[1].position, [3.0, -1.0, 0.5]);
}
