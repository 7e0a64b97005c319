#[macro_use]
mod common;

#[cfg(test)]
mod _if {
    tests! {
        then_branch in if is OK
        "then"
    }

    tests! {
        else_branch in if is OK
        "else"
    }

    tests! {
        dangling_else in if is OK
        "b"
    }

    // Only an explicit true is truthy, so a string picks the else branch.
    tests! {
        non_boolean_condition in if is OK
        "no"
    }
}
