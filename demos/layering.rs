use sort_circuit::bounds::Bounds;
use sort_circuit::dag;
use sort_circuit::graph::{Analysis, DepthTable};

const ROW_HEIGHT: i32 = 40;
const COL_WIDTH: i32 = 90;
const BOX_WIDTH: i32 = 70;
const BOX_HEIGHT: i32 = 30;

fn main() {
    // Library load order for a small circuit project
    let deps = dag! {
        "gates" => "plexers",
        "gates" => "arithmetic",
        "plexers" => "memory",
        "arithmetic" => "memory",
        "memory" => "cpu",
    };

    // Each library sits one row below the deepest library it builds on
    let depths = DepthTable::build(&deps).unwrap();

    let mut columns = vec![0; depths.get_max_depth() + 1];
    let mut canvas = Bounds::EMPTY;
    for lib in deps.iter() {
        let row = depths.get_depth(lib).unwrap();
        let col = columns[row];
        columns[row] += 1;

        let bounds = Bounds::create(col * COL_WIDTH, row as i32 * ROW_HEIGHT, BOX_WIDTH, BOX_HEIGHT);
        canvas = canvas.add_bounds(bounds);
        println!("{lib}: row {row} at {bounds}");
    }

    println!("canvas: {}", canvas.expand(10));
}
