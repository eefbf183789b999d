use crate::geometry::Point;

/// Returns the 8-connected pixels joining `p0` and `p1`, both endpoints included.
///
/// The walk always starts from the endpoint that is smaller along the major
/// axis, so `rasterize_line(a, b)` and `rasterize_line(b, a)` cover the same pixels.
pub fn rasterize_line(p0: Point, p1: Point) -> Vec<Point> {
    if (p1.y - p0.y).abs() < (p1.x - p0.x).abs() {
        if p0.x > p1.x {
            plot_line_low(p1, p0)
        } else {
            plot_line_low(p0, p1)
        }
    } else if p0.y > p1.y {
        plot_line_high(p1, p0)
    } else {
        plot_line_high(p0, p1)
    }
}

/// x-major case, `start.x <= end.x`
fn plot_line_low(start: Point, end: Point) -> Vec<Point> {
    let dx = end.x - start.x;
    let mut dy = end.y - start.y;
    let mut y_step = 1;
    if dy < 0 {
        y_step = -1;
        dy = -dy;
    }

    let mut d = 2 * dy - dx;
    let mut y = start.y;
    let mut points = Vec::with_capacity(dx as usize + 1);
    for x in start.x..=end.x {
        points.push(Point::new(x, y));
        if d > 0 {
            y += y_step;
            d -= 2 * dx;
        }
        d += 2 * dy;
    }
    points
}

/// y-major case, `start.y <= end.y`
fn plot_line_high(start: Point, end: Point) -> Vec<Point> {
    let mut dx = end.x - start.x;
    let dy = end.y - start.y;
    let mut x_step = 1;
    if dx < 0 {
        x_step = -1;
        dx = -dx;
    }

    let mut d = 2 * dx - dy;
    let mut x = start.x;
    let mut points = Vec::with_capacity(dy as usize + 1);
    for y in start.y..=end.y {
        points.push(Point::new(x, y));
        if d > 0 {
            x += x_step;
            d -= 2 * dy;
        }
        d += 2 * dx;
    }
    points
}
