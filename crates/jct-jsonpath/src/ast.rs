use jct_value::JsonValue;

/// One step of a parsed path expression, applied to the whole current
/// working set before moving to the next step.
#[derive(Debug, Clone)]
pub enum Selector {
    /// `.name`
    Child(String),
    /// `['a','b']` — ordered union of named children.
    ChildUnion(Vec<String>),
    /// `*` in dot or bracket form.
    Wildcard,
    /// `..` — expands the working set to the union of all descendants of
    /// each current node (self included), parents before children.
    RecursiveDescent,
    /// `[n]`, `[n1,n2,...]` — ordered union of array indices. Negative
    /// indices are resolved at evaluation time per the strict/lenient
    /// rule.
    IndexUnion(Vec<i64>),
    /// `[start:end:step]`, with `end`/`step` defaulting to array length
    /// and `1` respectively.
    Slice {
        start: Option<i64>,
        end: Option<i64>,
        step: i64,
    },
    /// `[?(expr)]`
    Filter(FilterExpr),
}

/// The filter sub-language AST, rooted at the lowest-precedence operator
/// (`||`).
#[derive(Debug, Clone)]
pub enum FilterExpr {
    Not(Box<FilterExpr>),
    And(Box<FilterExpr>, Box<FilterExpr>),
    Or(Box<FilterExpr>, Box<FilterExpr>),
    Compare(CompareOp, FilterTerm, FilterTerm),
    /// A bare term with no comparator: truthy iff it exists and is
    /// neither `null` nor `false`.
    Bare(FilterTerm),
}

#[derive(Debug, Clone)]
pub enum FilterTerm {
    /// `@` followed by zero or more `.name` / `['name']` / `[n]` steps.
    CurrentPath(Vec<PathStep>),
    Literal(JsonValue),
}

#[derive(Debug, Clone)]
pub enum PathStep {
    Name(String),
    Index(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}
