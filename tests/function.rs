#[macro_use]
mod common;

#[cfg(test)]
mod function {
    tests! {
        declaration_and_call in function is OK
        "3"
    }

    tests! {
        print_function in function is OK
        "<fn named>"
    }

    tests! {
        print_native in function is OK
        "<native fn clock>"
    }

    tests! {
        recursion in function is OK
        "55"
    }

    tests! {
        nil_return_by_default in function is OK
        "nil"
    }

    tests! {
        wrong_arity in function is ERR
        "[line 4:3 in tests/target/function/wrong_arity.lbpl]: Wrong number of arguments."
    }

    tests! {
        call_non_callable in function is ERR
        "[line 2:1 in tests/target/function/call_non_callable.lbpl]: Can only call a function or class initializer."
    }

    tests! {
        parameters_are_local in function is ERR
        "[line 5:8 in tests/target/function/parameters_are_local.lbpl]: Undefined name 'a'."
    }
}
