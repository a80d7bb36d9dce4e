//! SQL statements for the student and permission tables. Values are always bound as parameters.

/// Columns of the output schema, in `Student` field order.
const STUDENT_COLUMNS: &str = "id, name, parent, phone, address";

pub fn select_active_by_id() -> String {
    format!("SELECT {STUDENT_COLUMNS} FROM student WHERE id = $1 AND delete_time IS NULL")
}

pub fn select_active() -> String {
    format!("SELECT {STUDENT_COLUMNS} FROM student WHERE delete_time IS NULL ORDER BY id")
}

/// Caller binds `like_contains(q)` as $1.
pub fn search_active_by_name() -> String {
    format!(
        r"SELECT {STUDENT_COLUMNS} FROM student WHERE name LIKE $1 ESCAPE '\' AND delete_time IS NULL ORDER BY id"
    )
}

pub fn insert_student() -> String {
    format!("INSERT INTO student (name, parent, phone, address) VALUES ($1, $2, $3, $4) RETURNING {STUDENT_COLUMNS}")
}

pub const LOCK_ACTIVE_BY_ID: &str = "SELECT id FROM student WHERE id = $1 AND delete_time IS NULL FOR UPDATE";

pub fn update_student() -> String {
    format!(
        "UPDATE student SET name = $2, parent = $3, phone = $4, address = $5, update_time = NOW() \
         WHERE id = $1 RETURNING {STUDENT_COLUMNS}"
    )
}

pub const SOFT_DELETE_BY_ID: &str =
    "UPDATE student SET delete_time = NOW() WHERE id = $1 AND delete_time IS NULL RETURNING id";

pub const UNMOUNT_ALL_PERMISSIONS: &str = "UPDATE lin_permission SET mount = FALSE";

pub const MOUNT_PERMISSION: &str = "INSERT INTO lin_permission (module, name, mount) VALUES ($1, $2, TRUE) \
     ON CONFLICT (module, name) DO UPDATE SET mount = TRUE";

pub const GRANT_PERMISSION: &str = "INSERT INTO lin_group_permission (group_name, permission_id) \
     SELECT $1, id FROM lin_permission WHERE module = $2 AND name = $3 \
     ON CONFLICT DO NOTHING";

pub const REVOKE_PERMISSION: &str = "DELETE FROM lin_group_permission gp USING lin_permission p \
     WHERE gp.permission_id = p.id AND gp.group_name = $1 AND p.module = $2 AND p.name = $3";

pub const IS_GRANTED: &str = "SELECT EXISTS (SELECT 1 FROM lin_group_permission gp \
     JOIN lin_permission p ON p.id = gp.permission_id \
     WHERE p.mount AND p.module = $1 AND p.name = $2 AND gp.group_name = ANY($3))";

/// LIKE pattern matching `q` as a literal substring.
pub fn like_contains(q: &str) -> String {
    let mut pattern = String::with_capacity(q.len() + 2);
    pattern.push('%');
    for c in q.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_wraps_and_escapes() {
        assert_eq!(like_contains("Ann"), "%Ann%");
        assert_eq!(like_contains(""), "%%");
        assert_eq!(like_contains("50%_off"), r"%50\%\_off%");
        assert_eq!(like_contains(r"a\b"), r"%a\\b%");
    }

    #[test]
    fn read_paths_filter_tombstones() {
        for sql in [select_active_by_id(), select_active(), search_active_by_name()] {
            assert!(sql.contains("delete_time IS NULL"), "{sql}");
        }
        assert!(SOFT_DELETE_BY_ID.contains("delete_time IS NULL"));
    }
}
