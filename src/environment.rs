use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::object::Object;
use crate::token::Token;

/// A name to value map with an optional link to the enclosing scope.
/// Environments are reference shared: closures, bound methods and class
/// declarations all pin the environment chain they captured.
#[derive(Debug, Clone)]
pub struct Environment {
    pub enclosing: Option<Rc<RefCell<Environment>>>,
    pub variables: HashMap<String, Object>,
}

impl Environment {
    pub fn new(enclosing: Option<Rc<RefCell<Environment>>>) -> Self {
        Environment {
            enclosing,
            variables: HashMap::new(),
        }
    }

    /// Inserts or overwrites a name in this environment.
    pub fn define(&mut self, name: &str, value: Object) {
        self.variables.insert(name.to_string(), value);
    }

    /// Walks up exactly `distance` parents. The distance comes from the
    /// resolver, so a missing parent is a resolution bug, not a user error.
    fn ancestor(&self, distance: usize) -> Rc<RefCell<Environment>> {
        let parent = self.enclosing.clone()
            .unwrap_or_else(|| panic!("enclosing environment to exist at depth 1"));
        let mut environment = Rc::clone(&parent);

        for i in 1..distance {
            let parent = environment.borrow().enclosing.clone()
                .unwrap_or_else(|| panic!("enclosing environment to exist at depth {}", i + 1));
            environment = parent;
        }

        environment
    }

    /// Assigns to the closest scope that already defines the name.
    pub fn assign(&mut self, name: &Token, value: Object) -> Result<(), RuntimeError> {
        if self.variables.contains_key(&name.lexeme) {
            self.variables.insert(name.lexeme.clone(), value);
            return Ok(());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow_mut().assign(name, value);
        }

        Err(RuntimeError {
            token: name.clone(),
            message: format!("Undefined variable '{}'.", name.lexeme),
        })
    }

    /// Assigns to the scope exactly `distance` parents up.
    pub fn assign_at(&mut self, distance: usize, name: &Token, value: Object) {
        if distance > 0 {
            self.ancestor(distance)
                .borrow_mut()
                .variables
                .insert(name.lexeme.clone(), value);
        } else {
            self.variables.insert(name.lexeme.clone(), value);
        }
    }

    /// Reads the closest definition of the name, walking outwards.
    pub fn get(&self, name: &Token) -> Result<Object, RuntimeError> {
        if let Some(variable) = self.variables.get(&name.lexeme) {
            return Ok(variable.clone());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow().get(name);
        }

        Err(RuntimeError {
            token: name.clone(),
            message: format!("Undefined name '{}'.", name.lexeme),
        })
    }

    /// Reads the name from the scope exactly `distance` parents up.
    pub fn get_at(&self, distance: usize, name: &Token) -> Result<Object, RuntimeError> {
        let variable = if distance > 0 {
            self.ancestor(distance).borrow().variables.get(&name.lexeme).cloned()
        } else {
            self.variables.get(&name.lexeme).cloned()
        };

        variable.ok_or_else(|| RuntimeError {
            token: name.clone(),
            message: format!("Undefined name '{}'.", name.lexeme),
        })
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn wrap(environment: Environment) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(environment))
    }

    #[test]
    fn define_and_get() {
        let mut environment = Environment::new(None);
        environment.define("a", Object::from(1));

        assert_eq!(environment.get(&Token::from("a")).unwrap(), Object::from(1));
        assert!(environment.get(&Token::from("b")).is_err());
    }

    #[test]
    fn get_walks_out_to_enclosing_scopes() {
        let outer = wrap(Environment::new(None));
        outer.borrow_mut().define("a", Object::from("outer"));

        let inner = Environment::new(Some(Rc::clone(&outer)));
        assert_eq!(inner.get(&Token::from("a")).unwrap(), Object::from("outer"));
    }

    #[test]
    fn shadowed_name_resolves_by_distance() {
        let outer = wrap(Environment::new(None));
        outer.borrow_mut().define("a", Object::from("outer"));

        let mut inner = Environment::new(Some(Rc::clone(&outer)));
        inner.define("a", Object::from("inner"));

        assert_eq!(inner.get_at(0, &Token::from("a")).unwrap(), Object::from("inner"));
        assert_eq!(inner.get_at(1, &Token::from("a")).unwrap(), Object::from("outer"));
    }

    #[test]
    fn assign_updates_the_defining_scope() {
        let outer = wrap(Environment::new(None));
        outer.borrow_mut().define("a", Object::from(1));

        let mut inner = Environment::new(Some(Rc::clone(&outer)));
        inner.assign(&Token::from("a"), Object::from(2)).unwrap();

        assert_eq!(outer.borrow().get(&Token::from("a")).unwrap(), Object::from(2));
    }

    #[test]
    fn assign_to_undefined_name_fails() {
        let mut environment = Environment::new(None);
        let error = environment.assign(&Token::from("ghost"), Object::from(1)).unwrap_err();

        assert_eq!(error.message, "Undefined variable 'ghost'.");
    }

    #[test]
    fn assign_at_reaches_the_exact_scope() {
        let outer = wrap(Environment::new(None));
        outer.borrow_mut().define("a", Object::from(1));

        let mut inner = Environment::new(Some(Rc::clone(&outer)));
        inner.define("a", Object::from(10));
        inner.assign_at(1, &Token::from("a"), Object::from(2));

        assert_eq!(inner.get_at(0, &Token::from("a")).unwrap(), Object::from(10));
        assert_eq!(outer.borrow().get(&Token::from("a")).unwrap(), Object::from(2));
    }
}
