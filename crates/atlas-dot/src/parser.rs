// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Recursive-descent DOT parser building an [`atlas_graph::Graph`].
use atlas_graph::{Attributes, Graph};
use rustc_hash::FxHashSet;

use crate::error::DotError;
use crate::lexer::{Token, TokenKind, Tokens};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Strict,
    Graph,
    Digraph,
    Node,
    Edge,
    Subgraph,
}

fn keyword(kind: &TokenKind<'_>) -> Option<Keyword> {
    let TokenKind::Id {
        text,
        quoted: false,
    } = kind
    else {
        return None;
    };
    [
        ("strict", Keyword::Strict),
        ("graph", Keyword::Graph),
        ("digraph", Keyword::Digraph),
        ("node", Keyword::Node),
        ("edge", Keyword::Edge),
        ("subgraph", Keyword::Subgraph),
    ]
    .into_iter()
    .find(|(word, _)| text.eq_ignore_ascii_case(word))
    .map(|(_, kw)| kw)
}

/// Attribute defaults in effect for the current (sub)graph.
#[derive(Debug, Clone, Default)]
struct Scope {
    node_defaults: Attributes,
    edge_defaults: Attributes,
}

/// One side of an edge statement.
enum Operand {
    Node(String),
    Group(Vec<String>),
}

impl Operand {
    fn into_ids(self) -> Vec<String> {
        match self {
            Self::Node(id) => vec![id],
            Self::Group(ids) => ids,
        }
    }
}

pub(crate) struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    cursor: usize,
    end: (usize, usize),
    graph: Graph,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(tokens: Tokens<'a>) -> Self {
        Self {
            tokens: tokens.tokens,
            cursor: 0,
            end: tokens.end,
            graph: Graph::new(),
        }
    }

    fn peek(&self) -> Option<&TokenKind<'a>> {
        self.tokens.get(self.cursor).map(|t| &t.kind)
    }

    fn peek_nth(&self, n: usize) -> Option<&TokenKind<'a>> {
        self.tokens.get(self.cursor + n).map(|t| &t.kind)
    }

    fn peek_keyword(&self) -> Option<Keyword> {
        self.peek().and_then(keyword)
    }

    fn advance(&mut self) -> Option<&Token<'a>> {
        let token = self.tokens.get(self.cursor);
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn error_here(&self, message: impl Into<String>) -> DotError {
        let (line, column) = self
            .tokens
            .get(self.cursor)
            .map_or(self.end, |t| (t.line, t.column));
        DotError::new(line, column, message)
    }

    fn expect(&mut self, want: &TokenKind<'_>, what: &str) -> Result<(), DotError> {
        if self.peek() == Some(want) {
            self.advance();
            Ok(())
        } else {
            Err(self.error_here(format!("expected {what}")))
        }
    }

    /// `[strict] (graph | digraph) [ID] '{' stmt_list '}'`
    pub(crate) fn parse_graph(mut self) -> Result<Graph, DotError> {
        if self.peek_keyword() == Some(Keyword::Strict) {
            self.advance();
        }
        let directed = match self.peek_keyword() {
            Some(Keyword::Graph) => false,
            Some(Keyword::Digraph) => true,
            _ => return Err(self.error_here("expected `graph` or `digraph`")),
        };
        self.advance();
        self.graph = Graph::with_direction(directed);

        if matches!(self.peek(), Some(TokenKind::Id { .. })) {
            self.id("graph name")?;
        }
        self.expect(&TokenKind::LBrace, "`{`")?;
        let mut scope = Scope::default();
        let mut members = Vec::new();
        self.stmt_list(&mut scope, &mut members)?;
        self.expect(&TokenKind::RBrace, "`}`")?;

        if self.peek().is_some() {
            return Err(self.error_here("unexpected content after the closing `}`"));
        }
        Ok(self.graph)
    }

    fn stmt_list(&mut self, scope: &mut Scope, members: &mut Vec<String>) -> Result<(), DotError> {
        loop {
            match self.peek() {
                None | Some(TokenKind::RBrace) => return Ok(()),
                Some(TokenKind::Semi | TokenKind::Comma) => {
                    self.advance();
                }
                Some(_) => self.stmt(scope, members)?,
            }
        }
    }

    fn stmt(&mut self, scope: &mut Scope, members: &mut Vec<String>) -> Result<(), DotError> {
        match self.peek_keyword() {
            Some(Keyword::Graph) => {
                self.advance();
                self.attr_list()?;
                return Ok(());
            }
            Some(Keyword::Node) => {
                self.advance();
                let attrs = self.attr_list()?;
                scope.node_defaults.extend(attrs);
                return Ok(());
            }
            Some(Keyword::Edge) => {
                self.advance();
                let attrs = self.attr_list()?;
                scope.edge_defaults.extend(attrs);
                return Ok(());
            }
            _ => {}
        }

        if matches!(self.peek(), Some(TokenKind::Id { .. }))
            && self.peek_nth(1) == Some(&TokenKind::Equals)
        {
            // Graph attribute `key = value`; carries nothing for the pipeline.
            self.id("attribute name")?;
            self.advance();
            self.id("attribute value")?;
            return Ok(());
        }

        let first = self.operand(scope, members)?;
        if !self.at_edge_op() {
            if let Operand::Node(id) = first {
                if self.peek() == Some(&TokenKind::LBracket) {
                    let attrs = self.attr_list()?;
                    self.graph.add_node(id, attrs);
                }
            }
            return Ok(());
        }

        let mut chain = vec![first.into_ids()];
        while self.at_edge_op() {
            self.advance();
            chain.push(self.operand(scope, members)?.into_ids());
        }
        let mut data = scope.edge_defaults.clone();
        if self.peek() == Some(&TokenKind::LBracket) {
            data.extend(self.attr_list()?);
        }
        for pair in chain.windows(2) {
            for from in &pair[0] {
                for to in &pair[1] {
                    self.graph.add_link(from, to, data.clone());
                }
            }
        }
        Ok(())
    }

    fn at_edge_op(&self) -> bool {
        matches!(
            self.peek(),
            Some(TokenKind::DirectedEdge | TokenKind::UndirectedEdge)
        )
    }

    fn operand(&mut self, scope: &Scope, members: &mut Vec<String>) -> Result<Operand, DotError> {
        if self.peek() == Some(&TokenKind::LBrace) || self.peek_keyword() == Some(Keyword::Subgraph)
        {
            let ids = self.subgraph(scope)?;
            members.extend(ids.iter().cloned());
            return Ok(Operand::Group(ids));
        }
        let id = self.node_id()?;
        if !self.graph.has_node(&id) {
            self.graph.add_node(id.clone(), scope.node_defaults.clone());
        }
        members.push(id.clone());
        Ok(Operand::Node(id))
    }

    /// `[subgraph [ID]] '{' stmt_list '}'`; returns the member node ids.
    fn subgraph(&mut self, parent: &Scope) -> Result<Vec<String>, DotError> {
        if self.peek_keyword() == Some(Keyword::Subgraph) {
            self.advance();
            if matches!(self.peek(), Some(TokenKind::Id { .. })) {
                self.id("subgraph name")?;
            }
        }
        self.expect(&TokenKind::LBrace, "`{`")?;
        let mut scope = parent.clone();
        let mut inner = Vec::new();
        self.stmt_list(&mut scope, &mut inner)?;
        self.expect(&TokenKind::RBrace, "`}`")?;

        let mut seen = FxHashSet::default();
        inner.retain(|id| seen.insert(id.clone()));
        Ok(inner)
    }

    /// `ID [':' ID [':' ID]]`; ports and compass points are dropped.
    fn node_id(&mut self) -> Result<String, DotError> {
        let id = self.id("node id")?;
        if self.peek() == Some(&TokenKind::Colon) {
            self.advance();
            self.id("port")?;
            if self.peek() == Some(&TokenKind::Colon) {
                self.advance();
                self.id("compass point")?;
            }
        }
        Ok(id)
    }

    /// A single ID, joining `"a" + "b"` concatenations of quoted strings.
    fn id(&mut self, what: &str) -> Result<String, DotError> {
        let Some(token) = self.tokens.get(self.cursor) else {
            return Err(self.error_here(format!("expected {what}")));
        };
        let TokenKind::Id { text, quoted } = &token.kind else {
            return Err(self.error_here(format!("expected {what}")));
        };
        if keyword(&token.kind).is_some() {
            return Err(self.error_here(format!("keyword `{text}` cannot be used as {what}")));
        }
        let mut value = text.clone().into_owned();
        let quoted = *quoted;
        self.advance();

        while quoted && self.peek() == Some(&TokenKind::Plus) {
            match self.peek_nth(1) {
                Some(TokenKind::Id { text, quoted: true }) => {
                    value.push_str(text);
                    self.advance();
                    self.advance();
                }
                _ => {
                    self.advance();
                    return Err(self.error_here("expected a quoted string after `+`"));
                }
            }
        }
        Ok(value)
    }

    /// `('[' [a_list] ']')+`; a bare key reads as `key=true`.
    fn attr_list(&mut self) -> Result<Attributes, DotError> {
        if self.peek() != Some(&TokenKind::LBracket) {
            return Err(self.error_here("expected `[`"));
        }
        let mut attrs = Attributes::new();
        while self.peek() == Some(&TokenKind::LBracket) {
            self.advance();
            loop {
                match self.peek() {
                    Some(TokenKind::RBracket) => {
                        self.advance();
                        break;
                    }
                    Some(TokenKind::Semi | TokenKind::Comma) => {
                        self.advance();
                    }
                    Some(TokenKind::Id { .. }) => {
                        let key = self.id("attribute name")?;
                        let value = if self.peek() == Some(&TokenKind::Equals) {
                            self.advance();
                            self.id("attribute value")?
                        } else {
                            "true".to_owned()
                        };
                        attrs.insert(key, value);
                    }
                    _ => return Err(self.error_here("expected an attribute or `]`")),
                }
            }
        }
        Ok(attrs)
    }
}
