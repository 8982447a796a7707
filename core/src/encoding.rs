//! Versioned binary encoding of compiled trees.
//!
//! Layout: one format version byte followed by the `postcard` encoding of the
//! [`Node`]. Each node starts with its variant index (condition, unary,
//! binary, ternary, function, method), then its name as a length-prefixed
//! string, then its children in order. A method stores its receiver before
//! its arguments.
//!
//! Decoding checks the nesting of the payload before handing it to postcard,
//! whose deserializer recurses once per node.

use postcard::{take_from_bytes, to_allocvec};
use thiserror::Error;

use crate::parser::{self, Node};

/// Version written as the first byte of every encoded tree.
pub const FORMAT_VERSION: u8 = 1;

/// Deepest tree [`decode`] accepts. Compiled trees never exceed it.
pub const DEFAULT_MAX_DEPTH: usize = parser::DEFAULT_MAX_DEPTH;

#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("Encoded tree is empty")]
    Empty,

    #[error("Unsupported tree encoding version {found} (expected {expected})")]
    UnsupportedVersion { found: u8, expected: u8 },

    #[error("Failed to serialize tree: {0}")]
    Serialize(postcard::Error),

    #[error("Malformed tree encoding: {0}")]
    Malformed(postcard::Error),

    #[error("{count} unexpected byte(s) after the encoded tree")]
    TrailingBytes { count: usize },

    #[error("Encoded tree is nested deeper than {max_depth} levels")]
    TooDeep { max_depth: usize },
}

pub fn encode(node: &Node) -> Result<Vec<u8>, EncodingError> {
    let payload = to_allocvec(node).map_err(EncodingError::Serialize)?;
    let mut bytes = Vec::with_capacity(payload.len() + 1);
    bytes.push(FORMAT_VERSION);
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

pub fn decode(bytes: &[u8]) -> Result<Node, EncodingError> {
    decode_with_max_depth(bytes, DEFAULT_MAX_DEPTH)
}

pub fn decode_with_max_depth(bytes: &[u8], max_depth: usize) -> Result<Node, EncodingError> {
    let (&version, payload) = bytes.split_first().ok_or(EncodingError::Empty)?;
    if version != FORMAT_VERSION {
        return Err(EncodingError::UnsupportedVersion {
            found: version,
            expected: FORMAT_VERSION,
        });
    }
    check_depth(payload, max_depth)?;
    let (node, rest) = take_from_bytes::<Node>(payload).map_err(EncodingError::Malformed)?;
    if !rest.is_empty() {
        return Err(EncodingError::TrailingBytes { count: rest.len() });
    }
    Ok(node)
}

/// What the depth check expects next, and at which depth.
enum Expect {
    Nodes { remaining: usize, depth: usize },
    /// The argument count of a method whose receiver was just read.
    Arguments { depth: usize },
}

/// Walks the node headers of `payload` without recursing and fails once a
/// node sits deeper than `max_depth`.
///
/// The walk stops quietly at the first malformed header; postcard reports
/// that error when it reaches the same byte, no deeper than the walk went.
fn check_depth(payload: &[u8], max_depth: usize) -> Result<(), EncodingError> {
    let mut cursor = Cursor { bytes: payload };
    let mut stack = vec![Expect::Nodes {
        remaining: 1,
        depth: 1,
    }];

    while let Some(top) = stack.last_mut() {
        let depth = match top {
            Expect::Nodes { remaining: 0, .. } => {
                stack.pop();
                continue;
            }
            Expect::Nodes { remaining, depth } => {
                *remaining -= 1;
                *depth
            }
            Expect::Arguments { depth } => {
                let depth = *depth;
                stack.pop();
                let Some(count) = cursor.varint() else {
                    return Ok(());
                };
                stack.push(Expect::Nodes {
                    remaining: count,
                    depth,
                });
                continue;
            }
        };

        if depth > max_depth {
            return Err(EncodingError::TooDeep { max_depth });
        }
        let (Some(variant), Some(())) = (cursor.varint(), cursor.string()) else {
            return Ok(());
        };
        let children = depth + 1;
        match variant {
            0 => {}
            1..=3 => stack.push(Expect::Nodes {
                remaining: variant,
                depth: children,
            }),
            4 => {
                let Some(count) = cursor.varint() else {
                    return Ok(());
                };
                stack.push(Expect::Nodes {
                    remaining: count,
                    depth: children,
                });
            }
            5 => {
                stack.push(Expect::Arguments { depth: children });
                stack.push(Expect::Nodes {
                    remaining: 1,
                    depth: children,
                });
            }
            _ => return Ok(()),
        }
    }
    Ok(())
}

/// Reads the postcard primitives that make up node headers.
struct Cursor<'a> {
    bytes: &'a [u8],
}

impl Cursor<'_> {
    /// An unsigned LEB128 varint.
    fn varint(&mut self) -> Option<usize> {
        let mut value: usize = 0;
        for (i, &byte) in self.bytes.iter().enumerate().take(10) {
            let shift = 7 * i as u32;
            value |= usize::from(byte & 0x7f).checked_shl(shift)?;
            if byte & 0x80 == 0 {
                self.bytes = &self.bytes[i + 1..];
                return Some(value);
            }
        }
        None
    }

    /// A length-prefixed string, skipped.
    fn string(&mut self) -> Option<()> {
        let len = self.varint()?;
        self.bytes = self.bytes.get(len..)?;
        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encoded_bytes() {
        let tree = Node::binary("+", Node::condition("1"), Node::condition("2"));
        assert_eq!(
            encode(&tree).unwrap(),
            vec![FORMAT_VERSION, 2, 1, 43, 0, 1, 49, 0, 1, 50]
        );

        let call = Node::method("m", Node::condition("o"), vec![Node::condition("x")]);
        // variant 5, "m", receiver "o", one argument "x"
        assert_eq!(
            encode(&call).unwrap(),
            vec![FORMAT_VERSION, 5, 1, 109, 0, 1, 111, 1, 0, 1, 120]
        );
    }

    #[test]
    fn test_method_context_survives_round_trip() {
        let tree = Node::method(
            "get",
            Node::method("inner", Node::condition("obj"), vec![]),
            vec![Node::ternary(
                "?:",
                Node::condition("a"),
                Node::unary("-", Node::condition("b")),
                Node::function("f", vec![]),
            )],
        );
        let decoded = decode(&encode(&tree).unwrap()).unwrap();
        assert_eq!(decoded, tree);
        assert_eq!(decoded.context(), tree.context());
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(decode(&[]), Err(EncodingError::Empty)));
        assert!(matches!(
            decode(&[9, 0, 1, 49]),
            Err(EncodingError::UnsupportedVersion {
                found: 9,
                expected: FORMAT_VERSION
            })
        ));
        assert!(matches!(
            decode(&[FORMAT_VERSION, 2, 1]),
            Err(EncodingError::Malformed(_))
        ));
        assert!(matches!(
            decode(&[FORMAT_VERSION, 0, 1, 49, 7, 7]),
            Err(EncodingError::TrailingBytes { count: 2 })
        ));
    }

    #[test]
    fn test_deep_payload_is_rejected_before_deserializing() {
        let mut bytes = vec![FORMAT_VERSION];
        for _ in 0..200_000 {
            bytes.extend_from_slice(&[1, 1, 45]);
        }
        bytes.extend_from_slice(&[0, 1, 49]);
        assert!(matches!(
            decode(&bytes),
            Err(EncodingError::TooDeep {
                max_depth: DEFAULT_MAX_DEPTH
            })
        ));
    }

    #[test]
    fn test_depth_limit_counts_every_child_kind() {
        // f(o.m(-x)) is four nodes deep
        let tree = Node::function(
            "f",
            vec![Node::method(
                "m",
                Node::condition("o"),
                vec![Node::unary("-", Node::condition("x"))],
            )],
        );
        let bytes = encode(&tree).unwrap();
        assert_eq!(decode_with_max_depth(&bytes, 4).unwrap(), tree);
        assert!(matches!(
            decode_with_max_depth(&bytes, 3),
            Err(EncodingError::TooDeep { max_depth: 3 })
        ));

        let ternary = Node::ternary(
            "?:",
            Node::condition("c"),
            Node::condition("t"),
            Node::binary("+", Node::condition("a"), Node::condition("b")),
        );
        let bytes = encode(&ternary).unwrap();
        assert_eq!(decode_with_max_depth(&bytes, 3).unwrap(), ternary);
        assert!(decode_with_max_depth(&bytes, 2).is_err());
    }
}
