//! Sort orders parsed from `sort=property(,property)*(,asc|desc)?` query parameters.

use crate::error::AppError;
use crate::model::Student;
use std::cmp::Ordering;
use std::str::FromStr;

/// Sortable student properties. Each maps to a column of the same name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StudentProperty {
    Id,
    Firstname,
    Lastname,
    Email,
}

impl StudentProperty {
    pub fn column(self) -> &'static str {
        match self {
            StudentProperty::Id => "id",
            StudentProperty::Firstname => "firstname",
            StudentProperty::Lastname => "lastname",
            StudentProperty::Email => "email",
        }
    }

    fn compare(self, a: &Student, b: &Student) -> Ordering {
        match self {
            StudentProperty::Id => a.id.cmp(&b.id),
            StudentProperty::Firstname => a.firstname.cmp(&b.firstname),
            StudentProperty::Lastname => a.lastname.cmp(&b.lastname),
            StudentProperty::Email => a.email.cmp(&b.email),
        }
    }
}

impl FromStr for StudentProperty {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(StudentProperty::Id),
            "firstname" => Ok(StudentProperty::Firstname),
            "lastname" => Ok(StudentProperty::Lastname),
            "email" => Ok(StudentProperty::Email),
            _ => Err(AppError::BadRequest(format!(
                "no property '{}' found for type student",
                s
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Some(Direction::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Some(Direction::Desc)
        } else {
            None
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Order {
    pub property: StudentProperty,
    pub direction: Direction,
}

/// Ordered list of sort orders. Empty means ascending by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sort {
    pub orders: Vec<Order>,
}

impl Sort {
    pub fn by(property: StudentProperty, direction: Direction) -> Self {
        Sort {
            orders: vec![Order { property, direction }],
        }
    }

    /// Parse every `sort` parameter value in request order. Blank values are ignored.
    /// A trailing `asc`/`desc` token applies to all properties of that value.
    pub fn parse<'a, I>(values: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut orders = Vec::new();
        for value in values {
            let mut tokens: Vec<&str> = value
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect();
            let direction = match tokens.last().and_then(|t| Direction::parse(t)) {
                Some(d) => {
                    tokens.pop();
                    d
                }
                None => Direction::Asc,
            };
            for token in tokens {
                orders.push(Order {
                    property: token.parse()?,
                    direction,
                });
            }
        }
        Ok(Sort { orders })
    }

    /// Orders with the id tiebreaker appended (ascending) unless id is already sorted on.
    pub fn effective_orders(&self) -> Vec<Order> {
        let mut orders = self.orders.clone();
        if !orders.iter().any(|o| o.property == StudentProperty::Id) {
            orders.push(Order {
                property: StudentProperty::Id,
                direction: Direction::Asc,
            });
        }
        orders
    }

    /// In-memory comparator equivalent to the SQL ORDER BY built from the same sort.
    pub fn compare(&self, a: &Student, b: &Student) -> Ordering {
        for order in self.effective_orders() {
            let ord = order.property.compare(a, b);
            let ord = match order.direction {
                Direction::Asc => ord,
                Direction::Desc => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}
