use yielder::Generator;

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Point {
    x: i32,
    y: i32,
}

struct Rect {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Rect {
    fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }
}

#[yielder::test]
fn lattice_points_in_rectangle() {
    let r = Rect {
        x: 2,
        y: 3,
        width: 2,
        height: 4,
    };

    let lattice = Generator::from_fn(|co| {
        for x in 0..10 {
            for y in 0..10 {
                co.publish(Point { x, y })?;
            }
        }
        Ok(())
    });

    let ps: HashSet<Point> = lattice
        .cursor()
        .map(Result::unwrap)
        .filter(|p| r.contains(*p))
        .collect();

    let mut expected = HashSet::new();
    for x in 0..10 {
        for y in 0..10 {
            if r.contains(Point { x, y }) {
                expected.insert(Point { x, y });
            }
        }
    }

    assert_eq!(ps.len(), 8);
    assert_eq!(ps, expected);
}

#[yielder::test]
fn fibonacci_prefix_sum() {
    let fibs = Generator::from_fn(|co| {
        let (mut a, mut b) = (0u64, 1u64);
        loop {
            co.publish(a)?;
            (a, b) = (b, a + b);
        }
    });

    let sum: u64 = fibs.cursor().take(45).map(Result::unwrap).sum();
    assert_eq!(sum, 1_836_311_902);
}

#[yielder::test]
fn limited_stream_sum() {
    let nums = vec![0, 1, 2, 3, 4, 5];
    let expected: i32 = nums.iter().sum();

    let generator = Generator::from_fn(move |co| {
        for &n in &nums {
            co.publish(n)?;
        }
        Ok(())
    });

    let sum: i32 = generator.cursor().take(6).map(Result::unwrap).sum();
    assert_eq!(sum, expected);
}

#[yielder::test]
fn generators_compose() {
    let squares = Generator::from_fn(|co| {
        for i in 0u32..10 {
            co.publish(i * i)?;
        }
        Ok(())
    });

    let running_sums = Generator::from_fn(move |co| {
        let mut acc = 0;
        for square in &squares {
            acc += square?;
            co.publish(acc)?;
        }
        Ok(())
    });

    let sums: Vec<u32> = running_sums.cursor().collect::<Result<_, _>>().unwrap();
    assert_eq!(sums, vec![0, 1, 5, 14, 30, 55, 91, 140, 204, 285]);
}
