/// 경매 생성
pub const INSERT_AUCTION: &str = r#"
    INSERT INTO auctions (id, product_name, category, description, condition, status, "timestamp")
    VALUES ($1, $2, $3, $4, $5, $6, $7)
"#;

/// 만료 경매 종료 ($1: Closed, $2: Open, $3: cutoff)
pub const CLOSE_EXPIRED_AUCTIONS: &str =
    r#"UPDATE auctions SET status = $1 WHERE status = $2 AND "timestamp" < $3"#;

/// 경매 조회
pub const GET_AUCTION: &str = r#"SELECT id, product_name, category, description, condition, status, "timestamp" FROM auctions WHERE id = $1"#;

/// 경매 목록 조회 (조건은 QueryBuilder 로 추가)
pub const SELECT_AUCTIONS: &str = r#"SELECT id, product_name, category, description, condition, status, "timestamp" FROM auctions WHERE 1 = 1"#;
