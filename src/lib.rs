#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs, unreachable_pub)]
/*!

`sort-circuit`

Dependency-ordering data structures for circuit design tools: a directed
graph that can never contain a cycle ([dag]), analyses a host runs over it
([graph]), and the immutable geometry and interning values a drawing canvas
shares ([bounds], [cache]).

*/
#![doc = "## Simple Example\n```"]
#![doc = include_str!("../demos/simple.rs")]
#![doc = "\n```"]

pub mod bounds;
pub mod cache;
pub mod dag;
pub mod graph;
pub mod util;
