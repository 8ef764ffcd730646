use crate::expr::{Expr, ExprNode, Lambda};
use std::fmt;

// Fully parenthesized; meant for diagnostics and test failure output.

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node() {
            ExprNode::Parameter(p) => f.write_str(&p.name),
            ExprNode::Constant(c) => write!(f, "{}", c.value),
            ExprNode::Member(m) => write!(f, "{}.{}", m.target, m.field),
            ExprNode::Compare { op, left, right } => write!(f, "({left} {op} {right})"),
            ExprNode::And(left, right) => write!(f, "({left} && {right})"),
            ExprNode::Or(left, right) => write!(f, "({left} || {right})"),
            ExprNode::Not(inner) => write!(f, "!{inner}"),
            ExprNode::IsNull(inner) => write!(f, "({inner} == null)"),
            ExprNode::Lambda(lambda) => write!(f, "{lambda}"),
        }
    }
}

impl fmt::Display for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("|")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}: {}", param.ty())?;
        }
        write!(f, "| {}", self.body)
    }
}
