//! # gormgen-core
//!
//! Turns parsed MySQL `CREATE TABLE` statements into Go structs annotated
//! for the gorm ORM.
//!
//! The pipeline is pure and synchronous: every table is transformed into a
//! [`StructDecl`], rendered and formatted as Go source, and the structs of a
//! run are gathered into a [`GeneratedModule`] together with the imports
//! their field types need.
//!
//! ```rust
//! use gormgen_core::{generate_sql, Options};
//! use gormgen_ddl::ParseOptions;
//!
//! let sql = "CREATE TABLE `t_order_items` (
//!     `id` int PRIMARY KEY AUTO_INCREMENT,
//!     `order_id` int NOT NULL,
//!     `created_at` datetime NULL
//! );";
//!
//! let options = Options::new().with_table_prefix("t_");
//! let module = generate_sql(sql, &ParseOptions::default(), &options).unwrap();
//!
//! assert_eq!(module.imports, vec!["database/sql".to_string()]);
//! assert!(module.render().contains("type OrderItems struct {"));
//! ```

pub mod driver;
pub mod error;
pub mod inflect;
pub mod naming;
pub mod options;
pub mod render;
pub mod tags;
pub mod transform;
pub mod types;

pub use driver::{generate, generate_sql, generate_table, GeneratedModule};
pub use error::{GenerateError, Result};
pub use naming::{field_name, to_camel, Acronyms};
pub use options::{NullStyle, Options, UnknownNullStyle};
pub use render::{format_source, render_file, render_struct, FormatError};
pub use transform::{transform, FieldDecl, StructDecl};
pub use types::{map_type, GoType};
