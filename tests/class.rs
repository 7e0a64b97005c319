#[macro_use]
mod common;

#[cfg(test)]
mod class {
    tests! {
        print_class in class is OK
        "<class Foo>"
    }

    tests! {
        inline_declaration in class is OK
        "<class Bare>"
    }

    tests! {
        instantiate in class is OK
        "<instance Foo>"
    }

    tests! {
        methods in class is OK
        "go"
    }

    tests! {
        methods_with_arguments in class is OK
        "36"
    }
}
