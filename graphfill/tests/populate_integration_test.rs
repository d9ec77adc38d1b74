//! Integration tests for populating object graphs through the public API

use graphfill::{InstantiationError, PopulateError, RandomValues, Randomizable};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Debug, Clone, Default, PartialEq, Randomizable)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Randomizable)]
pub struct Line {
    pub start: Point,
    pub end: Point,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Randomizable)]
pub struct Recursive {
    pub value: i32,
    pub child: Option<Box<Recursive>>,
}

#[derive(Debug, Clone, Default, PartialEq, Randomizable)]
pub struct Waypoint {
    pub name: String,
    pub position: Point,
}

#[derive(Debug, Clone, Default, PartialEq, Randomizable)]
pub struct Route {
    pub from: Waypoint,
    pub to: Waypoint,
}

#[derive(Debug, Default, Randomizable)]
pub struct Region {
    pub name: String,
    pub country: Option<Country>,
}

#[derive(Debug, Default, Randomizable)]
pub struct Country {
    pub name: String,
    pub continent: Option<Continent>,
}

#[derive(Debug, Default, Randomizable)]
pub struct Continent {
    pub name: String,
    pub planet: Option<Planet>,
}

#[derive(Debug, Default, Randomizable)]
pub struct Planet {
    pub name: String,
}

#[derive(Debug, Default, Randomizable)]
pub struct Parent {
    pub name: String,
    pub child: Option<Box<Child>>,
}

#[derive(Debug, Default, Randomizable)]
pub struct Child {
    pub age: u8,
    pub parent: Option<Box<Parent>>,
}

#[derive(Debug, Default, Randomizable)]
pub struct Account {
    pub owner: String,
    pub balance: rust_decimal::Decimal,
    pub opened: chrono::NaiveDate,
    pub nickname: Option<String>,
    pub avatar: Vec<u8>,
    revision: u32,
}

#[derive(Debug, Randomizable)]
#[randomizable(constructor = "Fragile::explode")]
pub struct Fragile {
    pub value: i32,
}

impl Fragile {
    fn explode() -> Self {
        panic!("fragile construction")
    }
}

#[derive(Debug, Randomizable)]
#[randomizable(no_default)]
pub struct Handle {
    pub id: u64,
}

#[derive(Debug, Default, Randomizable)]
pub struct Holder {
    pub fragile: Option<Fragile>,
    pub handles: Vec<Handle>,
    pub point: Point,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_is_populated() {
        let values = RandomValues::new();
        let populated = (0..10)
            .map(|_| values.create_random::<Point>().unwrap())
            .filter(|point| *point != Point::default())
            .count();
        assert!(populated > 0);
    }

    #[test]
    fn test_line_siblings_are_populated_independently() {
        let values = RandomValues::new().with_seed(17);
        let line: Line = values.create_random().unwrap();

        assert!(line.label.starts_with("label"));
        assert_ne!(line.start, Point::default());
        assert_ne!(line.end, Point::default());
        assert_ne!(line.start, line.end);
    }

    #[test]
    fn test_repeated_type_is_built_for_every_sibling() {
        for seed in 0..8 {
            let route: Route = RandomValues::new().with_seed(seed).create_random().unwrap();
            assert!(route.from.name.starts_with("name"));
            assert!(route.to.name.starts_with("name"));
            // Point is first seen under `from` at the same depth as under `to`
            assert_ne!(route.to.position, Point::default());
        }
    }

    #[test]
    fn test_recursive_type_populates_one_level() {
        let recursive: Recursive = RandomValues::new().create_random().unwrap();

        let child = recursive.child.as_ref().expect("first level is populated");
        assert!(child.child.is_none());
    }

    #[test]
    fn test_mutual_recursion_terminates() {
        let parent: Parent = RandomValues::new().create_random().unwrap();

        let child = parent.child.as_ref().expect("child is populated");
        let grandparent = child.parent.as_ref().expect("parent type is first seen here");
        assert!(grandparent.name.starts_with("name"));
        assert!(grandparent.child.is_none());
    }

    #[test]
    fn test_max_depth_limits_nesting() {
        let values = RandomValues::new().with_max_depth(1);
        let line: Line = values.create_random().unwrap();
        assert_eq!(line.start, Point::default());
        assert_eq!(line.end, Point::default());
        assert!(line.label.starts_with("label"));

        let recursive: Recursive = values.create_random().unwrap();
        assert!(recursive.child.is_none());

        let values = RandomValues::new().with_max_depth(2);
        let recursive: Recursive = values.create_random().unwrap();
        assert!(recursive.child.is_some());
    }

    #[test]
    fn test_max_depth_on_a_chain_of_distinct_types() {
        let region: Region = RandomValues::new().with_max_depth(3).create_random().unwrap();
        let country = region.country.as_ref().expect("depth 2 is populated");
        let continent = country.continent.as_ref().expect("depth 3 is populated");
        assert!(continent.name.starts_with("name"));
        assert!(continent.planet.is_none());

        let region: Region = RandomValues::new().create_random().unwrap();
        let planet = region
            .country
            .and_then(|country| country.continent)
            .and_then(|continent| continent.planet)
            .expect("unbounded depth reaches the end of the chain");
        assert!(planet.name.starts_with("name"));
    }

    #[test]
    fn test_zero_max_depth_populates_only_the_root() {
        let values = RandomValues::new().with_max_depth(0);
        let region: Region = values.create_random().unwrap();
        assert!(region.name.starts_with("name"));
        assert!(region.country.is_none());
    }

    #[test]
    fn test_shape_is_deterministic() {
        let values = RandomValues::new();
        for _ in 0..20 {
            let recursive: Recursive = values.create_random().unwrap();
            assert!(recursive.child.as_ref().is_some_and(|c| c.child.is_none()));
        }
    }

    #[test]
    fn test_unseeded_calls_produce_different_values() {
        let values = RandomValues::new();
        let lines: Vec<Line> = (0..5).map(|_| values.create_random().unwrap()).collect();
        assert!(lines.windows(2).any(|pair| pair[0] != pair[1]));

        let first: Point = values.create_random().unwrap();
        let second: Point = values.create_random().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_well_known_types_and_private_fields() {
        let account: Account = RandomValues::new().create_random().unwrap();

        assert!(account.owner.starts_with("owner"));
        assert!(account.nickname.as_deref().is_some_and(|n| n.starts_with("nickname")));
        assert!((10..100).contains(&account.avatar.len()));
        assert!(account.balance >= rust_decimal::Decimal::ZERO);
        assert_eq!(account.revision, 0);
    }

    #[test]
    fn test_nested_failures_are_absorbed() {
        let holder: Holder = RandomValues::new().create_random().unwrap();

        assert!(holder.fragile.is_none());
        assert!(holder.handles.is_empty());
        // Siblings of failed fields are still populated
        assert!(holder.point != Point::default() || holder.count != 0);
    }

    #[test]
    fn test_root_failures_are_reported() {
        let values = RandomValues::new();

        let error = values.create_random::<Fragile>().unwrap_err();
        assert!(matches!(
            error,
            PopulateError::Instantiation {
                source: InstantiationError::Panicked(ref message),
                ..
            } if message == "fragile construction"
        ));

        let error = values.create_random::<Handle>().unwrap_err();
        assert!(matches!(
            error,
            PopulateError::Instantiation {
                source: InstantiationError::NoConstructor,
                ..
            }
        ));
        assert!(error.to_string().contains("Handle"));
    }

    #[test]
    fn test_wrapped_root() {
        let values = RandomValues::new();
        let point: Option<Box<Point>> = values.create_random().unwrap();
        assert!(point.is_some());

        let recursive: Option<Recursive> = values.create_random().unwrap();
        assert!(recursive.is_some_and(|r| r.child.is_some()));
    }

    #[test]
    fn test_callback_runs_after_population() {
        let line = RandomValues::new()
            .create_random_with(|line: &mut Line| line.label = "fixed".to_string())
            .unwrap();
        assert_eq!(line.label, "fixed");

        let point = RandomValues::new()
            .create_instance_with_random_values(|point: &mut Point| point.x = 7)
            .unwrap();
        assert_eq!(point.x, 7);
    }

    #[test]
    fn test_populate_existing_instance() {
        let values = RandomValues::new();

        let mut recursive = Recursive::default();
        values.populate_in_place(&mut recursive).unwrap();
        assert!(recursive.child.is_some());

        let account = values.populate(Account::default()).unwrap();
        assert!(account.owner.starts_with("owner"));
    }

    #[test]
    fn test_populate_through_wrappers() {
        let values = RandomValues::new();

        let wrapped = values.populate(Some(Box::new(Waypoint::default()))).unwrap();
        let waypoint = wrapped.expect("wrapper is kept");
        assert!(waypoint.name.starts_with("name"));

        assert_eq!(values.populate(None::<Waypoint>).unwrap(), None);
        assert!(matches!(
            values.populate(String::new()),
            Err(PopulateError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let values = RandomValues::new().with_seed(2024);
        let first: Line = values.create_random().unwrap();
        let second: Line = values.create_random().unwrap();
        assert_eq!(first, second);

        let mut rng = StdRng::seed_from_u64(99);
        let from_rng: Recursive = values.create_random_with_rng(&mut rng).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        assert_eq!(from_rng, values.create_random_with_rng(&mut rng).unwrap());
    }

    #[test]
    fn test_populate_with_caller_rng() {
        let values = RandomValues::new();
        let mut rng = StdRng::seed_from_u64(5);

        let mut first = Point::default();
        values.populate_in_place_with_rng(&mut first, &mut rng).unwrap();
        let mut second = Point::default();
        values.populate_in_place_with_rng(&mut second, &mut rng).unwrap();
        assert_ne!(first, second);
    }
}
