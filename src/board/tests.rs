use super::*;

#[test]
fn test_player_opponent() {
    assert_eq!(Player::Black.opponent(), Player::White);
    assert_eq!(Player::White.opponent(), Player::Black);
}

#[test]
fn test_player_from_str() {
    assert_eq!("black".parse::<Player>(), Ok(Player::Black));
    assert_eq!("W".parse::<Player>(), Ok(Player::White));
    assert!("red".parse::<Player>().is_err());
}

#[test]
fn test_player_values_round_trip() {
    for player in [Player::Black, Player::White] {
        assert_eq!(Player::from_value(player.value()), Some(player));
    }
    assert_eq!(Player::from_value(0), None);
    assert_eq!(Player::from_value(3), None);
}

#[test]
fn test_pos_manhattan_distance() {
    let a = Pos::new(0, 0);
    let b = Pos::new(2, 3);
    assert_eq!(a.manhattan_distance(b), 5);
    assert_eq!(b.manhattan_distance(a), 5);
    assert_eq!(a.manhattan_distance(a), 0);
}

#[test]
fn test_pos_offset() {
    let pos = Pos::new(1, 1);
    assert_eq!(pos.offset(-1, -1, 1, 5), Some(Pos::new(0, 0)));
    assert_eq!(pos.offset(1, 0, 3, 5), Some(Pos::new(4, 1)));
    assert_eq!(pos.offset(-1, 0, 2, 5), None);
    assert_eq!(pos.offset(0, 1, 4, 5), None);
}

#[test]
fn test_pos_ordering() {
    let pos1 = Pos::new(0, 0);
    let pos2 = Pos::new(0, 1);
    let pos3 = Pos::new(1, 0);

    assert!(pos1 < pos2);
    assert!(pos2 < pos3);
    assert!(pos1 < pos3);
}

#[test]
fn test_board_size_validation() {
    assert!(Board::new(3).is_ok());
    assert!(Board::new(7).is_ok());
    assert_eq!(Board::new(4), Err(BoardError::EvenSize(4)));
    assert_eq!(Board::new(1), Err(BoardError::TooSmall { size: 1, min: 3 }));
    assert!(matches!(Board::new(257), Err(BoardError::TooLarge { .. })));
}

#[test]
fn test_new_board_is_empty() {
    let board = Board::new(5).unwrap();
    assert_eq!(board.size(), 5);
    assert_eq!(board.center(), Pos::new(2, 2));
    assert_eq!(board.stone_count(), 0);
    assert_eq!(board.empty_count(), 25);
    assert!(board.center_occupant().is_none());
    assert_eq!(board.positions().count(), 25);
}

#[test]
fn test_place_and_remove_stone() {
    let mut board = Board::new(5).unwrap();
    let pos = Pos::new(1, 3);

    board.place_stone(pos, Player::White);
    assert_eq!(board.get(pos), Some(Player::White));
    assert_eq!(board.stone_count(), 1);
    assert_eq!(board.empty_count(), 24);

    board.remove_stone(pos);
    assert!(board.is_empty(pos));
    assert_eq!(board.stone_count(), 0);

    // Removing twice is harmless
    board.remove_stone(pos);
    assert_eq!(board.stone_count(), 0);
}

#[test]
fn test_with_stone_leaves_original() {
    let board = Board::new(3).unwrap();
    let next = board.with_stone(Pos::new(0, 0), Player::Black);
    assert!(board.is_empty(Pos::new(0, 0)));
    assert_eq!(next.get(Pos::new(0, 0)), Some(Player::Black));
}

#[test]
fn test_with_line_alternates_colors() {
    let board = Board::new(5).unwrap();
    let line = [Pos::new(0, 0), Pos::new(4, 4), Pos::new(1, 1)];
    let projected = board.with_line(&line, Player::White);

    assert_eq!(projected.get(Pos::new(0, 0)), Some(Player::White));
    assert_eq!(projected.get(Pos::new(4, 4)), Some(Player::Black));
    assert_eq!(projected.get(Pos::new(1, 1)), Some(Player::White));
    assert_eq!(board.stone_count(), 0);
}

#[test]
fn test_perimeter_distance() {
    let board = Board::new(7).unwrap();
    assert_eq!(board.perimeter_distance(Pos::new(0, 3)), 0);
    assert_eq!(board.perimeter_distance(Pos::new(6, 6)), 0);
    assert_eq!(board.perimeter_distance(Pos::new(1, 5)), 1);
    assert_eq!(board.perimeter_distance(Pos::new(2, 4)), 2);
    assert_eq!(board.perimeter_distance(Pos::new(3, 3)), 3);
}

#[test]
fn test_center_distance() {
    let board = Board::new(5).unwrap();
    assert_eq!(board.center_distance(Pos::new(2, 2)), 0);
    assert_eq!(board.center_distance(Pos::new(0, 0)), 4);
    assert_eq!(board.center_distance(Pos::new(1, 2)), 1);
}

#[test]
fn test_from_rows() {
    let board = Board::from_rows(&["B . W", "x o .", ". . 1"]).unwrap();
    assert_eq!(board.get(Pos::new(0, 0)), Some(Player::Black));
    assert_eq!(board.get(Pos::new(0, 2)), Some(Player::White));
    assert_eq!(board.get(Pos::new(1, 0)), Some(Player::Black));
    assert_eq!(board.get(Pos::new(1, 1)), Some(Player::White));
    assert_eq!(board.get(Pos::new(2, 2)), Some(Player::Black));
    assert_eq!(board.stone_count(), 5);
}

#[test]
fn test_from_rows_rejects_malformed() {
    assert!(matches!(
        Board::from_rows(&["...", "..", "..."]),
        Err(BoardError::RaggedRow { row: 1, len: 2, expected: 3 })
    ));
    assert!(matches!(
        Board::from_rows(&["...", ".Z.", "..."]),
        Err(BoardError::InvalidCell { index: 4, .. })
    ));
    assert!(matches!(
        Board::from_rows(&["....", "....", "....", "...."]),
        Err(BoardError::EvenSize(4))
    ));
}

#[test]
fn test_from_values() {
    let black = Player::Black.value();
    let white = Player::White.value();
    let board = Board::from_values(3, &[black, 0, 0, 0, white, 0, 0, 0, 0]).unwrap();
    assert_eq!(board.get(Pos::new(0, 0)), Some(Player::Black));
    assert_eq!(board.center_occupant(), Some(Player::White));
    assert_eq!(board.stone_count(), 2);

    assert!(matches!(
        Board::from_values(3, &[0, 0, 3, 0, 0, 0, 0, 0, 0]),
        Err(BoardError::InvalidCell { index: 2, .. })
    ));
    assert!(matches!(
        Board::from_values(3, &[0; 8]),
        Err(BoardError::WrongCellCount { expected: 9, actual: 8 })
    ));
}

#[test]
fn test_display_round_trips_through_from_rows() {
    let board = Board::from_rows(&["B..", ".W.", "..B"]).unwrap();
    let text = board.to_string();
    assert_eq!(text, "B . .\n. W .\n. . B\n");

    let rows: Vec<&str> = text.lines().collect();
    assert_eq!(Board::from_rows(&rows).unwrap(), board);
}
