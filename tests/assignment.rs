#[macro_use]
mod common;

#[cfg(test)]
mod assignment {
    tests! {
        returns_value in assignment is OK
        "2"
        "2"
    }

    tests! {
        right_associative in assignment is OK
        "3"
        "3"
    }

    tests! {
        from_inner_scope in assignment is OK
        "2"
    }

    tests! {
        undefined_target in assignment is ERR
        "[line 1:0 in tests/target/assignment/undefined_target.lbpl]: Undefined variable 'ghost'."
    }

    tests! {
        invalid_target in assignment is ERR
        "[line 1:2 in tests/target/assignment/invalid_target.lbpl]: Invalid assignment target."
    }
}
