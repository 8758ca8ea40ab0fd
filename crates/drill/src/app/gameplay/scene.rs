/// World position of a clickable object. Doors and fixtures sit on the
/// classroom walls; the desk id maps to the center desk of the grid.
pub(crate) fn object_position(object: ObjectId) -> Vec3 {
    match object {
        ObjectId::Extinguisher => EXTINGUISHER_POSITION,
        ObjectId::Window => WINDOW_POSITION,
        ObjectId::Desk => desk_positions()[DESK_GRID_ROWS * DESK_GRID_COLUMNS / 2],
        ObjectId::ExitDoor => EXIT_DOOR_POSITION,
        ObjectId::WestDoor => WEST_DOOR_POSITION,
        ObjectId::EastDoor => EAST_DOOR_POSITION,
    }
}

fn desk_positions() -> [Vec3; DESK_GRID_ROWS * DESK_GRID_COLUMNS] {
    let mut positions = [Vec3::ZERO; DESK_GRID_ROWS * DESK_GRID_COLUMNS];
    for row in 0..DESK_GRID_ROWS {
        for column in 0..DESK_GRID_COLUMNS {
            positions[row * DESK_GRID_COLUMNS + column] = Vec3::new(
                DESK_GRID_ORIGIN.x + column as f32 * DESK_COLUMN_SPACING_UNITS,
                DESK_GRID_ORIGIN.y,
                DESK_GRID_ORIGIN.z + row as f32 * DESK_ROW_SPACING_UNITS,
            );
        }
    }
    positions
}
