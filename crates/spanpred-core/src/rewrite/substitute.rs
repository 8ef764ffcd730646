use crate::expr::{Expr, map_children};

///
/// Replace every occurrence of `target` in `tree` with `replacement`.
///
/// Occurrences are matched by handle identity, never by structure: two
/// equal-looking constants are distinct nodes and only the one passed as
/// `target` is replaced. Lambda parameter lists are left intact, so
/// substituting a parameter only rewrites its uses.
///
/// The caller is responsible for `replacement` carrying the type of
/// `target`; the rewrite itself cannot fail.
///
#[must_use]
pub fn substitute(tree: &Expr, target: &Expr, replacement: &Expr) -> Expr {
    if tree.ptr_eq(target) {
        return replacement.clone();
    }

    map_children(tree, |child| substitute(child, target, replacement))
}
