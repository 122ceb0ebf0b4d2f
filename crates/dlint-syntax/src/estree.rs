//! ESTree JSON lowering.
//!
//! Converts the JSON tree emitted by an external JavaScript parser (espree,
//! acorn, typescript-estree, ...) into a [`NodeArena`]. Children are lowered
//! before their parent so every `add_*` call can wire parent links.
//!
//! Node types without a dedicated [`SyntaxKind`] are lowered generically:
//! every node-valued field becomes a child of a `SyntaxKind::Unknown` node,
//! ordered by source position.

use std::fmt;

use dlint_common::Position;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::node::*;
use crate::syntax_kind::SyntaxKind;

/// Error raised while loading an ESTree document.
#[derive(Debug)]
pub enum LoadError {
    /// The input is not valid JSON.
    Json(serde_json::Error),
    /// A value appeared where a node was expected but has no `type`.
    NotANode {
        /// Field that held the value (`<root>` for the document itself)
        field: String,
    },
    /// A node lacks a field it cannot be represented without.
    MissingField {
        node_type: String,
        field: &'static str,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Json(err) => write!(f, "invalid ESTree JSON: {err}"),
            LoadError::NotANode { field } => {
                write!(f, "expected an ESTree node in `{field}`, found a value without `type`")
            }
            LoadError::MissingField { node_type, field } => {
                write!(f, "{node_type} node is missing required field `{field}`")
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Json(err)
    }
}

/// Keys that never hold children.
const NON_CHILD_KEYS: &[&str] = &["type", "loc", "range", "start", "end", "parent"];

/// Parse ESTree JSON text into a `serde_json::Value`.
///
/// Syntax trees of real files nest far deeper than serde_json's default
/// recursion limit, so the limit is lifted here.
pub fn parse_json(json: &str) -> Result<Value, LoadError> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(value)
}

/// Lowers ESTree JSON values into a [`NodeArena`].
pub struct EstreeLoader {
    arena: NodeArena,
}

impl Default for EstreeLoader {
    fn default() -> Self {
        EstreeLoader::new()
    }
}

impl EstreeLoader {
    pub fn new() -> EstreeLoader {
        EstreeLoader {
            arena: NodeArena::new(),
        }
    }

    /// Lower a whole document and return the arena with its root.
    pub fn load(mut self, value: &Value) -> Result<(NodeArena, NodeIndex), LoadError> {
        let root = self.lower_node(value, "<root>")?;
        debug!(nodes = self.arena.len(), "lowered ESTree document");
        Ok((self.arena, root))
    }

    // =========================================================================
    // Field helpers
    // =========================================================================

    fn lower_node(&mut self, value: &Value, field: &str) -> Result<NodeIndex, LoadError> {
        let Some(obj) = value.as_object() else {
            return Err(LoadError::NotANode {
                field: field.to_string(),
            });
        };
        let Some(type_name) = obj.get("type").and_then(Value::as_str) else {
            return Err(LoadError::NotANode {
                field: field.to_string(),
            });
        };
        let index = self.lower_object(type_name, obj)?;
        if let Some(loc) = read_loc(obj) {
            self.arena.set_loc(index, loc);
        }
        Ok(index)
    }

    /// A child that may be absent or `null`.
    fn optional(&mut self, obj: &Map<String, Value>, field: &'static str) -> Result<NodeIndex, LoadError> {
        match obj.get(field) {
            None | Some(Value::Null) => Ok(NodeIndex::NONE),
            Some(value) if is_node(value) => self.lower_node(value, field),
            // Malformed optional children are dropped
            Some(_) => Ok(NodeIndex::NONE),
        }
    }

    /// A child the node cannot be represented without.
    fn required(
        &mut self,
        obj: &Map<String, Value>,
        type_name: &str,
        field: &'static str,
    ) -> Result<NodeIndex, LoadError> {
        match obj.get(field) {
            None | Some(Value::Null) => Err(LoadError::MissingField {
                node_type: type_name.to_string(),
                field,
            }),
            Some(value) => self.lower_node(value, field),
        }
    }

    /// A list of children. A missing list is empty; `null` holes are skipped.
    fn list(&mut self, obj: &Map<String, Value>, field: &'static str) -> Result<NodeList, LoadError> {
        let mut nodes = Vec::new();
        if let Some(Value::Array(items)) = obj.get(field) {
            nodes.reserve(items.len());
            for item in items {
                if item.is_null() {
                    continue;
                }
                nodes.push(self.lower_node(item, field)?);
            }
        }
        Ok(NodeList::new(nodes))
    }

    // =========================================================================
    // Per-type lowering
    // =========================================================================

    fn lower_object(&mut self, type_name: &str, obj: &Map<String, Value>) -> Result<NodeIndex, LoadError> {
        let (pos, end) = read_span(obj);
        let Some(kind) = SyntaxKind::from_name(type_name) else {
            return self.lower_unknown(type_name, obj, pos, end);
        };

        let index = match kind {
            SyntaxKind::Program | SyntaxKind::BlockStatement => {
                let body = self.list(obj, "body")?;
                self.arena.add_block(kind, pos, end, body)
            }
            SyntaxKind::ExpressionStatement | SyntaxKind::ChainExpression => {
                let expression = self.required(obj, type_name, "expression")?;
                self.arena.add_expr_statement(kind, pos, end, expression)
            }
            SyntaxKind::EmptyStatement
            | SyntaxKind::DebuggerStatement
            | SyntaxKind::ThisExpression
            | SyntaxKind::Super => self.arena.add_token(kind, pos, end),
            SyntaxKind::ReturnStatement => {
                let argument = self.optional(obj, "argument")?;
                self.arena.add_return(kind, pos, end, argument)
            }
            SyntaxKind::ThrowStatement => {
                let argument = self.required(obj, type_name, "argument")?;
                self.arena.add_return(kind, pos, end, argument)
            }
            SyntaxKind::IfStatement => {
                let expression = self.required(obj, type_name, "test")?;
                let then_statement = self.required(obj, type_name, "consequent")?;
                let else_statement = self.optional(obj, "alternate")?;
                self.arena.add_if_statement(
                    pos,
                    end,
                    IfStatementData {
                        expression,
                        then_statement,
                        else_statement,
                    },
                )
            }
            SyntaxKind::SwitchStatement => {
                let expression = self.required(obj, type_name, "discriminant")?;
                let clauses = self.list(obj, "cases")?;
                self.arena
                    .add_switch(pos, end, SwitchData { expression, clauses })
            }
            SyntaxKind::SwitchCase => {
                let expression = self.optional(obj, "test")?;
                let statements = self.list(obj, "consequent")?;
                self.arena.add_case_clause(
                    pos,
                    end,
                    CaseClauseData {
                        expression,
                        statements,
                    },
                )
            }
            SyntaxKind::TryStatement => {
                let try_block = self.required(obj, type_name, "block")?;
                let catch_clause = self.optional(obj, "handler")?;
                let finally_block = self.optional(obj, "finalizer")?;
                self.arena.add_try(
                    pos,
                    end,
                    TryData {
                        try_block,
                        catch_clause,
                        finally_block,
                    },
                )
            }
            SyntaxKind::CatchClause => {
                let variable_declaration = self.optional(obj, "param")?;
                let block = self.required(obj, type_name, "body")?;
                self.arena.add_catch_clause(
                    pos,
                    end,
                    CatchClauseData {
                        variable_declaration,
                        block,
                    },
                )
            }
            SyntaxKind::WhileStatement => {
                let condition = self.required(obj, type_name, "test")?;
                let statement = self.required(obj, type_name, "body")?;
                self.arena.add_loop(
                    kind,
                    pos,
                    end,
                    LoopData {
                        initializer: NodeIndex::NONE,
                        condition,
                        incrementor: NodeIndex::NONE,
                        statement,
                    },
                )
            }
            SyntaxKind::DoWhileStatement => {
                let statement = self.required(obj, type_name, "body")?;
                let condition = self.required(obj, type_name, "test")?;
                self.arena.add_loop(
                    kind,
                    pos,
                    end,
                    LoopData {
                        initializer: NodeIndex::NONE,
                        condition,
                        incrementor: NodeIndex::NONE,
                        statement,
                    },
                )
            }
            SyntaxKind::ForStatement => {
                let initializer = self.optional(obj, "init")?;
                let condition = self.optional(obj, "test")?;
                let incrementor = self.optional(obj, "update")?;
                let statement = self.required(obj, type_name, "body")?;
                self.arena.add_loop(
                    kind,
                    pos,
                    end,
                    LoopData {
                        initializer,
                        condition,
                        incrementor,
                        statement,
                    },
                )
            }
            SyntaxKind::ForInStatement | SyntaxKind::ForOfStatement => {
                let initializer = self.required(obj, type_name, "left")?;
                let expression = self.required(obj, type_name, "right")?;
                let statement = self.required(obj, type_name, "body")?;
                self.arena.add_for_in_of(
                    kind,
                    pos,
                    end,
                    ForInOfData {
                        await_modifier: read_bool(obj, "await"),
                        initializer,
                        expression,
                        statement,
                    },
                )
            }
            SyntaxKind::BreakStatement | SyntaxKind::ContinueStatement => {
                let label = self.optional(obj, "label")?;
                self.arena.add_jump(kind, pos, end, label)
            }
            SyntaxKind::LabeledStatement => {
                let label = self.required(obj, type_name, "label")?;
                let statement = self.required(obj, type_name, "body")?;
                self.arena
                    .add_labeled(pos, end, LabeledData { label, statement })
            }
            SyntaxKind::VariableDeclaration => {
                let declarations = self.list(obj, "declarations")?;
                self.arena.add_variable(
                    pos,
                    end,
                    VariableData {
                        declaration_kind: read_string(obj, "kind").unwrap_or_else(|| "var".to_string()),
                        declarations,
                    },
                )
            }
            SyntaxKind::VariableDeclarator => {
                let name = self.required(obj, type_name, "id")?;
                let initializer = self.optional(obj, "init")?;
                self.arena.add_variable_declaration(
                    pos,
                    end,
                    VariableDeclarationData { name, initializer },
                )
            }
            SyntaxKind::FunctionDeclaration
            | SyntaxKind::FunctionExpression
            | SyntaxKind::ArrowFunctionExpression => {
                let name = self.optional(obj, "id")?;
                let parameters = self.list(obj, "params")?;
                let body = self.required(obj, type_name, "body")?;
                self.arena.add_function(
                    kind,
                    pos,
                    end,
                    FunctionData {
                        name,
                        parameters,
                        body,
                        is_async: read_bool(obj, "async"),
                        asterisk_token: read_bool(obj, "generator"),
                    },
                )
            }
            SyntaxKind::Identifier => {
                let Some(name) = read_string(obj, "name") else {
                    return Err(LoadError::MissingField {
                        node_type: type_name.to_string(),
                        field: "name",
                    });
                };
                self.arena.add_identifier(pos, end, name)
            }
            SyntaxKind::Literal => {
                let data = LiteralData {
                    text: literal_text(obj),
                    raw_text: read_string(obj, "raw"),
                };
                self.arena.add_literal(kind, pos, end, data)
            }
            SyntaxKind::TemplateElement => {
                let value = obj.get("value");
                let cooked = value
                    .and_then(|v| v.get("cooked"))
                    .and_then(Value::as_str)
                    .map(str::to_string);
                let raw = value
                    .and_then(|v| v.get("raw"))
                    .and_then(Value::as_str)
                    .map(str::to_string);
                let data = LiteralData {
                    text: cooked.or_else(|| raw.clone()).unwrap_or_default(),
                    raw_text: raw,
                };
                self.arena.add_literal(kind, pos, end, data)
            }
            SyntaxKind::TemplateLiteral => {
                let quasis = self.list(obj, "quasis")?;
                let expressions = self.list(obj, "expressions")?;
                // quasi, expression, quasi, ..., quasi
                let mut elements = Vec::with_capacity(quasis.len() + expressions.len());
                let mut exprs = expressions.iter();
                for quasi in quasis.iter() {
                    elements.push(quasi);
                    if let Some(expr) = exprs.next() {
                        elements.push(expr);
                    }
                }
                elements.extend(exprs);
                self.arena
                    .add_literal_expr(kind, pos, end, NodeList::new(elements))
            }
            SyntaxKind::ArrayExpression | SyntaxKind::ArrayPattern => {
                let elements = self.list(obj, "elements")?;
                self.arena.add_literal_expr(kind, pos, end, elements)
            }
            SyntaxKind::ObjectExpression | SyntaxKind::ObjectPattern => {
                let properties = self.list(obj, "properties")?;
                self.arena.add_literal_expr(kind, pos, end, properties)
            }
            SyntaxKind::SequenceExpression => {
                let expressions = self.list(obj, "expressions")?;
                self.arena.add_literal_expr(kind, pos, end, expressions)
            }
            SyntaxKind::Property => {
                let shorthand = read_bool(obj, "shorthand");
                let name = self.required(obj, type_name, "key")?;
                let shares_key = shorthand
                    && obj.get("value").is_some_and(|value| {
                        value.get("type").and_then(Value::as_str) == Some("Identifier")
                            && value.get("name") == obj.get("key").and_then(|key| key.get("name"))
                    });
                let initializer = if shares_key {
                    name
                } else {
                    self.required(obj, type_name, "value")?
                };
                self.arena.add_property_assignment(
                    pos,
                    end,
                    PropertyAssignmentData {
                        name,
                        initializer,
                        computed: read_bool(obj, "computed"),
                        shorthand,
                    },
                )
            }
            SyntaxKind::UnaryExpression | SyntaxKind::UpdateExpression => {
                let operand = self.required(obj, type_name, "argument")?;
                let data = UnaryExprData {
                    operator: read_string(obj, "operator").unwrap_or_default(),
                    operand,
                    prefix: read_bool(obj, "prefix"),
                };
                self.arena.add_unary_expr(kind, pos, end, data)
            }
            SyntaxKind::AwaitExpression
            | SyntaxKind::SpreadElement
            | SyntaxKind::RestElement => {
                let operand = self.required(obj, type_name, "argument")?;
                let data = UnaryExprData {
                    operator: String::new(),
                    operand,
                    prefix: true,
                };
                self.arena.add_unary_expr(kind, pos, end, data)
            }
            SyntaxKind::YieldExpression => {
                let operand = self.optional(obj, "argument")?;
                let data = UnaryExprData {
                    operator: (if read_bool(obj, "delegate") { "*" } else { "" }).to_string(),
                    operand,
                    prefix: true,
                };
                self.arena.add_unary_expr(kind, pos, end, data)
            }
            SyntaxKind::BinaryExpression
            | SyntaxKind::LogicalExpression
            | SyntaxKind::AssignmentExpression
            | SyntaxKind::AssignmentPattern => {
                let left = self.required(obj, type_name, "left")?;
                let right = self.required(obj, type_name, "right")?;
                let data = BinaryExprData {
                    left,
                    operator: read_string(obj, "operator").unwrap_or_else(|| "=".to_string()),
                    right,
                };
                self.arena.add_binary_expr(kind, pos, end, data)
            }
            SyntaxKind::ConditionalExpression => {
                let condition = self.required(obj, type_name, "test")?;
                let when_true = self.required(obj, type_name, "consequent")?;
                let when_false = self.required(obj, type_name, "alternate")?;
                self.arena.add_conditional_expr(
                    pos,
                    end,
                    ConditionalExprData {
                        condition,
                        when_true,
                        when_false,
                    },
                )
            }
            SyntaxKind::CallExpression | SyntaxKind::NewExpression => {
                let expression = self.required(obj, type_name, "callee")?;
                let arguments = self.list(obj, "arguments")?;
                let data = CallExprData {
                    expression,
                    arguments,
                    optional: read_bool(obj, "optional"),
                };
                self.arena.add_call_expr(kind, pos, end, data)
            }
            SyntaxKind::MemberExpression => {
                let expression = self.required(obj, type_name, "object")?;
                let name_or_argument = self.required(obj, type_name, "property")?;
                self.arena.add_access_expr(
                    pos,
                    end,
                    AccessExprData {
                        expression,
                        name_or_argument,
                        computed: read_bool(obj, "computed"),
                        question_dot_token: read_bool(obj, "optional"),
                    },
                )
            }
            SyntaxKind::TaggedTemplateExpression => {
                let tag = self.required(obj, type_name, "tag")?;
                let template = self.required(obj, type_name, "quasi")?;
                self.arena
                    .add_tagged_template(pos, end, TaggedTemplateData { tag, template })
            }
            SyntaxKind::Unknown => return self.lower_unknown(type_name, obj, pos, end),
        };

        Ok(index)
    }

    /// Lower a node type with no typed pool: keep every node-valued field.
    fn lower_unknown(
        &mut self,
        type_name: &str,
        obj: &Map<String, Value>,
        pos: u32,
        end: u32,
    ) -> Result<NodeIndex, LoadError> {
        trace!(type_name, "lowering node without a dedicated kind");
        let mut children = Vec::new();
        for (key, value) in obj {
            if NON_CHILD_KEYS.contains(&key.as_str()) {
                continue;
            }
            match value {
                Value::Object(_) if is_node(value) => {
                    children.push(self.lower_node(value, key)?);
                }
                Value::Array(items) => {
                    for item in items.iter().filter(|item| is_node(item)) {
                        children.push(self.lower_node(item, key)?);
                    }
                }
                _ => {}
            }
        }
        // Object key order is not source order
        children.sort_by_key(|&child| self.arena.get(child).map_or(0, |node| node.pos));
        Ok(self
            .arena
            .add_unknown(pos, end, type_name, NodeList::new(children)))
    }
}

// =============================================================================
// Scalar readers
// =============================================================================

fn is_node(value: &Value) -> bool {
    value.get("type").is_some_and(Value::is_string)
}

fn read_bool(obj: &Map<String, Value>, field: &str) -> bool {
    obj.get(field).and_then(Value::as_bool).unwrap_or(false)
}

fn read_string(obj: &Map<String, Value>, field: &str) -> Option<String> {
    obj.get(field).and_then(Value::as_str).map(str::to_string)
}

fn read_u32(value: &Value) -> Option<u32> {
    value.as_u64().and_then(|n| u32::try_from(n).ok())
}

/// Source span from `range: [start, end]`, else `start`/`end`.
fn read_span(obj: &Map<String, Value>) -> (u32, u32) {
    if let Some(Value::Array(range)) = obj.get("range")
        && let [start, end] = range.as_slice()
        && let (Some(start), Some(end)) = (read_u32(start), read_u32(end))
    {
        return (start, end);
    }
    let start = obj.get("start").and_then(read_u32).unwrap_or(0);
    let end = obj.get("end").and_then(read_u32).unwrap_or(start);
    (start, end)
}

/// `loc.start` as a 0-indexed position. ESTree lines are 1-indexed.
fn read_loc(obj: &Map<String, Value>) -> Option<Position> {
    let start = obj.get("loc")?.get("start")?;
    let line = start.get("line").and_then(read_u32)?;
    let column = start.get("column").and_then(read_u32)?;
    Some(Position::new(line.saturating_sub(1), column))
}

/// Cooked literal text: strings unquoted, everything else as written.
fn literal_text(obj: &Map<String, Value>) -> String {
    match obj.get("value") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        // `null`, regex and bigint literals carry no JSON value
        _ => match (obj.get("regex"), obj.get("bigint")) {
            (Some(_), _) | (_, Some(_)) => read_string(obj, "raw").unwrap_or_default(),
            _ => "null".to_string(),
        },
    }
}
