//! A loaded source file: syntax tree plus optional source text.

use dlint_common::{LineMap, Position};
use serde_json::Value;
use tracing::debug_span;

use crate::estree::{EstreeLoader, LoadError, parse_json};
use crate::node::{NodeArena, NodeIndex};

/// One file ready for linting.
pub struct Program {
    pub file_name: String,
    /// Source text, when the caller has it. Used for line/column lookups.
    pub source: Option<String>,
    pub arena: NodeArena,
    pub root: NodeIndex,
    line_map: Option<LineMap>,
}

impl Program {
    /// Wrap an already-built tree.
    pub fn new(
        file_name: impl Into<String>,
        arena: NodeArena,
        root: NodeIndex,
        source: Option<String>,
    ) -> Program {
        let line_map = source.as_deref().map(LineMap::build);
        Program {
            file_name: file_name.into(),
            source,
            arena,
            root,
            line_map,
        }
    }

    /// Load a program from ESTree JSON text.
    pub fn from_json_str(
        file_name: impl Into<String>,
        json: &str,
        source: Option<String>,
    ) -> Result<Program, LoadError> {
        let file_name = file_name.into();
        let _span = debug_span!("load_estree", file = %file_name).entered();
        let value = parse_json(json)?;
        Program::from_value(file_name, &value, source)
    }

    /// Load a program from an already-parsed ESTree JSON value.
    pub fn from_value(
        file_name: impl Into<String>,
        value: &Value,
        source: Option<String>,
    ) -> Result<Program, LoadError> {
        let (arena, root) = EstreeLoader::new().load(value)?;
        Ok(Program::new(file_name, arena, root, source))
    }

    pub fn line_map(&self) -> Option<&LineMap> {
        self.line_map.as_ref()
    }

    /// 0-indexed start position of a node.
    ///
    /// Computed from the source text when present, otherwise taken from the
    /// location the producing parser recorded. Node offsets are UTF-16 code
    /// units, as ESTree parsers emit them.
    pub fn position_of(&self, index: NodeIndex) -> Option<Position> {
        let node = self.arena.get(index)?;
        if let Some(map) = &self.line_map {
            return Some(map.offset_to_position(node.pos));
        }
        self.arena.get_extended(index).and_then(|info| info.loc)
    }
}
