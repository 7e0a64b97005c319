#[macro_use]
mod common;

#[cfg(test)]
mod inheritance {
    tests! {
        inherit_methods in inheritance is OK
        "base"
    }

    tests! {
        override_method in inheritance is OK
        "child"
    }

    tests! {
        inherited_initializer in inheritance is OK
        "7"
    }

    tests! {
        from_itself in inheritance is ERR
        "[line 1:12 in tests/target/inheritance/from_itself.lbpl]: A class cannot inherit from itself."
    }

    tests! {
        superclass_must_be_class in inheritance is ERR
        "[line 2:12 in tests/target/inheritance/superclass_must_be_class.lbpl]: Superclass must be another class."
    }
}
