#[macro_use]
mod common;

#[cfg(test)]
mod this {
    tests! {
        refers_to_receiver in this is OK
        "<instance Me>"
    }

    tests! {
        outside_class in this is ERR
        "[line 1:8 in tests/target/this/outside_class.lbpl]: Cannot use 'this' outside of a class."
    }

    tests! {
        in_function_outside_class in this is ERR
        "[line 2:11 in tests/target/this/in_function_outside_class.lbpl]: Cannot use 'this' outside of a class."
    }
}
